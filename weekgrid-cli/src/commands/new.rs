use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use weekgrid_core::{AgendaDir, Schedule, TimeSlotDisplay, UseCase};

pub fn run(
    dir: &AgendaDir,
    name: Option<String>,
    display: Option<String>,
    use_case: Option<String>,
    days: Option<String>,
) -> Result<()> {
    let limits = dir.plan().limits();
    let existing = dir.list()?.len();
    if !limits.can_create_agenda(existing) {
        anyhow::bail!(
            "Agenda limit reached on the {} plan. Upgrade to pro to add more.",
            dir.plan()
        );
    }

    let interactive = name.is_none();

    // --- Name ---
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Agenda name")
            .interact_text()?,
    };

    // --- Time display ---
    let display = match display.as_deref() {
        Some("precise-hours") => TimeSlotDisplay::PreciseHours,
        Some("fixed-periods") => TimeSlotDisplay::FixedPeriods,
        Some("full-day") => TimeSlotDisplay::FullDay,
        Some(other) => anyhow::bail!(
            "Unknown display '{}'. Expected precise-hours, fixed-periods or full-day",
            other
        ),
        None if interactive => {
            let options = [
                "Precise hours (09:00, 13:30, ...)",
                "Fixed periods (Morning / Afternoon / Evening)",
                "Full day",
            ];
            match Select::new()
                .with_prompt("  How do you plan time?")
                .items(&options)
                .default(0)
                .interact()?
            {
                1 => TimeSlotDisplay::FixedPeriods,
                2 => TimeSlotDisplay::FullDay,
                _ => TimeSlotDisplay::PreciseHours,
            }
        }
        None => TimeSlotDisplay::PreciseHours,
    };

    // --- Use case ---
    let use_case = match use_case.as_deref() {
        Some("general") => UseCase::General,
        Some("rotation") => UseCase::Rotation,
        Some(other) => anyhow::bail!("Unknown use case '{}'. Expected general or rotation", other),
        None if interactive => {
            let options = ["General planning", "Rotation (who covers which slot)"];
            match Select::new()
                .with_prompt("  What is this agenda for?")
                .items(&options)
                .default(0)
                .interact()?
            {
                1 => UseCase::Rotation,
                _ => UseCase::General,
            }
        }
        None => UseCase::General,
    };

    // --- Active days ---
    let active_days = match days.as_deref() {
        Some("mon-fri") => (0..5).collect(),
        Some("mon-sat") => (0..6).collect(),
        Some("all") => (0..7).collect(),
        Some(other) => anyhow::bail!("Unknown days '{}'. Expected mon-fri, mon-sat or all", other),
        None if interactive => {
            let options = ["Monday to Friday", "Monday to Saturday", "Every day"];
            match Select::new()
                .with_prompt("  Which days are planned?")
                .items(&options)
                .default(0)
                .interact()?
            {
                0 => (0..5).collect(),
                1 => (0..6).collect(),
                _ => (0..7).collect(),
            }
        }
        None => (0..7).collect(),
    };

    let mut schedule = Schedule::new(&name, display, super::today());
    schedule.use_case = use_case;
    schedule.active_days = active_days;
    if display == TimeSlotDisplay::FixedPeriods {
        schedule.fixed_periods = Schedule::default_periods();
    }

    let slug = dir.save(&schedule)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created agenda '{}'", name).green());
    println!(
        "{}",
        format!("  Add members with: weekgrid member -a {} add <name>", slug).dimmed()
    );

    Ok(())
}
