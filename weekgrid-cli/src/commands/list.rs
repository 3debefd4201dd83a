use anyhow::Result;
use owo_colors::OwoColorize;
use weekgrid_core::AgendaDir;

use crate::render::Render;

pub fn run(dir: &AgendaDir) -> Result<()> {
    let summaries = dir.list()?;

    if summaries.is_empty() {
        println!("{}", "No agendas yet. Create one with: weekgrid new".dimmed());
        return Ok(());
    }

    for summary in &summaries {
        let marker = if dir.default_agenda() == Some(summary.slug.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, summary.render());
    }

    Ok(())
}
