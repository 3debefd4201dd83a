use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use weekgrid_core::AgendaDir;

pub fn run(dir: &AgendaDir, slug: &str) -> Result<()> {
    let schedule = dir.load_agenda(slug)?;

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "  Delete agenda '{}' ({} blocks)? This cannot be undone",
            schedule.name,
            schedule.blocks.len()
        ))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    dir.delete(slug)?;
    println!("{}", format!("  Deleted {}", schedule.name).red());

    Ok(())
}
