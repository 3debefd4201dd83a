use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use weekgrid_core::dates::week_days;
use weekgrid_core::store::BlockPatch;
use weekgrid_core::{AgendaDir, Block, ScheduleStore, TimeSlotDisplay, detect_conflict};

use crate::BlockCommands;
use crate::render::render_conflict;

pub fn run(dir: &AgendaDir, slug: &str, command: BlockCommands) -> Result<()> {
    let mut store = super::load_store(dir, slug)?;

    match command {
        BlockCommands::Add {
            date,
            start,
            end,
            members,
            label,
            period,
            repeat,
            force,
        } => add(
            dir, &mut store, date, start, end, members, label, period, repeat, force,
        ),
        BlockCommands::Edit {
            id,
            date,
            start,
            end,
            members,
            label,
            force,
        } => edit(dir, &mut store, id, date, start, end, members, label, force),
        BlockCommands::Remove { id, pattern } => remove(dir, &mut store, id, pattern),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    dir: &AgendaDir,
    store: &mut ScheduleStore,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    members: Vec<String>,
    label: Option<String>,
    period: Option<String>,
    repeat: bool,
    force: bool,
) -> Result<()> {
    let schedule = store.schedule().clone();
    let member_ids = super::resolve_members(&schedule, &members)?;

    // Resolve times; fixed-period agendas take them from the period's
    // defaults, full-day agendas span the whole day.
    let (start, end, period_id) = match schedule.time_slot_display {
        TimeSlotDisplay::FixedPeriods => {
            let Some(wanted) = period else {
                let available: Vec<_> = schedule
                    .fixed_periods
                    .iter()
                    .map(|p| p.label.clone())
                    .collect();
                anyhow::bail!(
                    "This agenda uses fixed periods; pass --period. Available: {}",
                    available.join(", ")
                );
            };
            let found = schedule
                .period(&wanted)
                .or_else(|| schedule.period_by_label(&wanted))
                .ok_or_else(|| anyhow::anyhow!("Unknown period '{}'", wanted))?;

            let start = start
                .or_else(|| found.default_start.clone())
                .unwrap_or_else(|| "08:00".to_string());
            let end = end
                .or_else(|| found.default_end.clone())
                .unwrap_or_else(|| "17:00".to_string());
            (start, end, Some(found.id.clone()))
        }
        TimeSlotDisplay::FullDay => (
            start.unwrap_or_else(|| "00:00".to_string()),
            end.unwrap_or_else(|| "23:59".to_string()),
            None,
        ),
        TimeSlotDisplay::PreciseHours => {
            let start = start.ok_or_else(|| anyhow::anyhow!("--start is required"))?;
            let end = end.ok_or_else(|| anyhow::anyhow!("--end is required"))?;
            (start, end, None)
        }
    };

    let dates: Vec<NaiveDate> = if repeat {
        week_days(schedule.current_week_start)
            .into_iter()
            .filter(|d| {
                let day_index = d.weekday().num_days_from_monday() as u8;
                schedule.active_days.contains(&day_index)
            })
            .collect()
    } else {
        let input = date.ok_or_else(|| anyhow::anyhow!("--date is required (or --repeat)"))?;
        vec![super::parse_day(&input, schedule.current_week_start)?]
    };

    // Blocks stamped together share a pattern id so they can be removed
    // as one unit later.
    let pattern = (dates.len() > 1).then(ScheduleStore::new_pattern_id);

    let mut added = 0;
    for date in dates {
        let mut block = Block::new(member_ids.clone(), date, &start, &end);
        block.label = label.clone();
        block.period = period_id.clone();
        block.pattern = pattern.clone();

        if let Some(conflict) = detect_conflict(&block, store.schedule())? {
            println!("{}", render_conflict(&conflict, store.schedule()));
            if !force {
                let add_anyway = Confirm::new()
                    .with_prompt("  Add anyway?")
                    .default(false)
                    .interact()?;
                if !add_anyway {
                    println!("{}", format!("  Skipped {}", date).dimmed());
                    continue;
                }
            }
        }

        store.add_block(block)?;
        added += 1;
    }

    dir.save(store.schedule())?;
    println!("{}", format!("  Added {} block(s)", added).green());
    if let Some(pattern) = &pattern {
        println!("{}", format!("  Pattern id: {}", pattern).dimmed());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn edit(
    dir: &AgendaDir,
    store: &mut ScheduleStore,
    id: String,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    members: Vec<String>,
    label: Option<String>,
    force: bool,
) -> Result<()> {
    let schedule = store.schedule().clone();
    let Some(current) = schedule.block(&id) else {
        anyhow::bail!("No block with id {}", id);
    };

    let mut patch = BlockPatch {
        start,
        end,
        label,
        ..Default::default()
    };
    if !members.is_empty() {
        patch.member_ids = Some(super::resolve_members(&schedule, &members)?);
    }
    if let Some(input) = date {
        patch.date = Some(super::parse_day(&input, schedule.current_week_start)?);
    }

    // Preview the merged block so conflicts surface before committing
    let mut preview = current.clone();
    if let Some(member_ids) = &patch.member_ids {
        preview.member_ids = member_ids.clone();
    }
    if let Some(date) = patch.date {
        preview.date = date;
    }
    if let Some(start) = &patch.start {
        preview.start = start.clone();
    }
    if let Some(end) = &patch.end {
        preview.end = end.clone();
    }

    if let Some(conflict) = detect_conflict(&preview, &schedule)? {
        println!("{}", render_conflict(&conflict, &schedule));
        if !force {
            let apply_anyway = Confirm::new()
                .with_prompt("  Apply anyway?")
                .default(false)
                .interact()?;
            if !apply_anyway {
                return Ok(());
            }
        }
    }

    store.update_block(&id, patch)?;
    dir.save(store.schedule())?;
    println!("{}", "  Updated".green());

    Ok(())
}

fn remove(
    dir: &AgendaDir,
    store: &mut ScheduleStore,
    id: Option<String>,
    pattern: Option<String>,
) -> Result<()> {
    match (id, pattern) {
        (Some(id), None) => {
            if store.schedule().block(&id).is_none() {
                anyhow::bail!("No block with id {}", id);
            }
            store.remove_block(&id);
            dir.save(store.schedule())?;
            println!("{}", "  Removed".red());
        }
        (None, Some(pattern)) => {
            let removed = store.remove_pattern(&pattern);
            dir.save(store.schedule())?;
            println!("{}", format!("  Removed {} block(s)", removed).red());
        }
        _ => anyhow::bail!("Pass a block id or --pattern <id>"),
    }

    Ok(())
}
