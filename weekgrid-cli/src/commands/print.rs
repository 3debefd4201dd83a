use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use weekgrid_core::AgendaDir;
use weekgrid_core::print::printable_view;

use crate::render::render_printable;

pub fn run(dir: &AgendaDir, slug: &str, out: Option<&Path>) -> Result<()> {
    let schedule = dir.load_agenda(slug)?;
    let view = printable_view(&schedule, dir.plan().watermarked());
    let text = render_printable(&view);

    match out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", format!("  Wrote {}", path.display()).green());
        }
        None => print!("{}", text),
    }

    Ok(())
}
