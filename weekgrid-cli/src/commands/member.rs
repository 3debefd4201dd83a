use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use weekgrid_core::AgendaDir;

use crate::MemberCommands;
use crate::render::Render;

pub fn run(dir: &AgendaDir, slug: &str, command: MemberCommands) -> Result<()> {
    let mut store = super::load_store(dir, slug)?;

    match command {
        MemberCommands::Add { name } => {
            let Some(member) = store.add_member(&name) else {
                anyhow::bail!(
                    "Member limit reached on the {} plan. Upgrade to pro to add more.",
                    dir.plan()
                );
            };
            dir.save(store.schedule())?;
            println!("{}", format!("  Added {}", member.render()).green());
        }
        MemberCommands::Rename { member, new_name } => {
            let id = super::resolve_member(store.schedule(), &member)?;
            store.update_member(&id, Some(&new_name), None);
            dir.save(store.schedule())?;
            println!("{}", format!("  Renamed to {}", new_name).green());
        }
        MemberCommands::Color { member, color } => {
            if !color.starts_with('#') || color.len() != 7 {
                anyhow::bail!("Invalid color '{}'. Expected a hex value like #d97706", color);
            }
            let id = super::resolve_member(store.schedule(), &member)?;
            store.update_member(&id, None, Some(&color));
            dir.save(store.schedule())?;
            println!("  Recolored {}", crate::render::swatch(&color));
        }
        MemberCommands::Remove { member } => {
            let id = super::resolve_member(store.schedule(), &member)?;
            let name = store
                .schedule()
                .member_name(&id)
                .unwrap_or(&id)
                .to_string();

            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "  Remove {}? Their assignments will be detached",
                    name
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok(());
            }

            store.remove_member(&id);
            dir.save(store.schedule())?;
            println!("{}", format!("  Removed {}", name).red());
        }
        MemberCommands::List => {
            let members = &store.schedule().members;
            if members.is_empty() {
                println!("{}", "No members yet".dimmed());
            }
            for member in members {
                println!("  {}", member.render());
            }
        }
    }

    Ok(())
}
