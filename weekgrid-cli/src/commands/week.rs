use anyhow::Result;
use weekgrid_core::AgendaDir;
use weekgrid_core::dates::week_days;

use crate::WeekCommands;

pub fn run(dir: &AgendaDir, slug: &str, command: WeekCommands) -> Result<()> {
    let mut store = super::load_store(dir, slug)?;

    match command {
        WeekCommands::Next => store.go_to_next_week(),
        WeekCommands::Prev => store.go_to_previous_week(),
        WeekCommands::Today => store.go_to_today(super::today()),
    }

    dir.save(store.schedule())?;

    let days = week_days(store.schedule().current_week_start);
    println!(
        "  Showing {} to {}",
        days[0].format("%a %b %-d"),
        days[6].format("%a %b %-d")
    );

    Ok(())
}
