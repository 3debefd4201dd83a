use anyhow::Result;
use owo_colors::OwoColorize;
use weekgrid_core::{AgendaDir, detect_all_conflicts};

use crate::render::render_conflict;

pub fn run(dir: &AgendaDir, slug: &str) -> Result<()> {
    let schedule = dir.load_agenda(slug)?;
    let conflicts = detect_all_conflicts(&schedule)?;

    if conflicts.is_empty() {
        println!("{}", "No double-bookings found".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} conflict(s) in '{}':", conflicts.len(), schedule.name).bold()
    );
    for conflict in &conflicts {
        println!("  {}", render_conflict(conflict, &schedule));
    }

    Ok(())
}
