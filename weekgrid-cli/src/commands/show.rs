use anyhow::Result;
use owo_colors::OwoColorize;
use weekgrid_core::view::{self, ViewMode};
use weekgrid_core::AgendaDir;

use crate::render;

pub fn run(dir: &AgendaDir, slug: &str, view_name: &str, date: Option<&str>) -> Result<()> {
    let schedule = dir.load_agenda(slug)?;
    let today = super::today();

    let mode = match view_name {
        "week" => ViewMode::Week,
        "month" => ViewMode::Month,
        "day" => {
            let day = match date {
                Some(d) => super::parse_day(d, schedule.current_week_start)?,
                None => today,
            };
            ViewMode::Day(day)
        }
        other => anyhow::bail!("Unknown view '{}'. Expected week, month or day", other),
    };

    let grid = view::compose(&schedule, mode, today)?;

    println!("{}", schedule.name.bold());
    println!();
    println!("{}", render::render_grid(&grid, &schedule));

    Ok(())
}
