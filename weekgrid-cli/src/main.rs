mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use weekgrid_core::AgendaDir;

#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(about = "Build, check, and print weekly team agendas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new agenda (interactive when options are omitted)
    New {
        name: Option<String>,

        /// Time display: precise-hours, fixed-periods or full-day
        #[arg(long)]
        display: Option<String>,

        /// Use case: general or rotation
        #[arg(long)]
        use_case: Option<String>,

        /// Active days: mon-fri, mon-sat or all
        #[arg(long)]
        days: Option<String>,
    },
    /// List agendas
    List,
    /// Render an agenda grid
    Show {
        /// Only operate on this agenda (by slug)
        #[arg(short, long)]
        agenda: Option<String>,

        /// View to render: week, month or day
        #[arg(long, default_value = "week")]
        view: String,

        /// Day to show in day view (YYYY-MM-DD or a weekday name)
        #[arg(long)]
        date: Option<String>,
    },
    /// Manage agenda members
    Member {
        #[arg(short, long)]
        agenda: Option<String>,

        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Manage time blocks
    Block {
        #[arg(short, long)]
        agenda: Option<String>,

        #[command(subcommand)]
        command: BlockCommands,
    },
    /// List every double-booking in an agenda
    Conflicts {
        #[arg(short, long)]
        agenda: Option<String>,
    },
    /// Move the displayed week
    Week {
        #[arg(short, long)]
        agenda: Option<String>,

        #[command(subcommand)]
        command: WeekCommands,
    },
    /// Export the displayed week as a printable text document
    Print {
        #[arg(short, long)]
        agenda: Option<String>,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Delete an agenda
    Delete { agenda: String },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Add a member (palette color assigned automatically)
    Add { name: String },
    /// Rename a member
    Rename { member: String, new_name: String },
    /// Change a member's display color (hex, e.g. "#d97706")
    Color { member: String, color: String },
    /// Remove a member; their blocks lose the assignment
    Remove { member: String },
    /// List members
    List,
}

#[derive(Subcommand)]
enum BlockCommands {
    /// Add a block, checking for double-bookings first
    Add {
        /// YYYY-MM-DD or a weekday name within the displayed week
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// Members on this block (name or id), repeatable
        #[arg(short, long = "member", required = true)]
        members: Vec<String>,

        /// Free-text caption
        #[arg(short, long)]
        label: Option<String>,

        /// Period label or id (fixed-periods agendas)
        #[arg(short, long)]
        period: Option<String>,

        /// Stamp the block on every active day of the displayed week
        #[arg(long)]
        repeat: bool,

        /// Commit even when a double-booking is detected
        #[arg(long)]
        force: bool,
    },
    /// Edit a block by id
    Edit {
        id: String,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// Replace the member list (name or id), repeatable
        #[arg(short, long = "member")]
        members: Vec<String>,

        /// New caption; pass an empty string to clear it
        #[arg(short, long)]
        label: Option<String>,

        #[arg(long)]
        force: bool,
    },
    /// Remove a block by id, or a whole repeated group by pattern id
    Remove {
        id: Option<String>,

        #[arg(long)]
        pattern: Option<String>,
    },
}

#[derive(Subcommand)]
enum WeekCommands {
    /// Show the following week
    Next,
    /// Show the previous week
    Prev,
    /// Snap back to the week containing today
    Today,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = AgendaDir::load()?;

    match cli.command {
        Commands::New {
            name,
            display,
            use_case,
            days,
        } => commands::new::run(&dir, name, display, use_case, days),
        Commands::List => commands::list::run(&dir),
        Commands::Show { agenda, view, date } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::show::run(&dir, &slug, &view, date.as_deref())
        }
        Commands::Member { agenda, command } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::member::run(&dir, &slug, command)
        }
        Commands::Block { agenda, command } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::block::run(&dir, &slug, command)
        }
        Commands::Conflicts { agenda } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::conflicts::run(&dir, &slug)
        }
        Commands::Week { agenda, command } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::week::run(&dir, &slug, command)
        }
        Commands::Print { agenda, out } => {
            let slug = resolve_agenda(&dir, agenda.as_deref())?;
            commands::print::run(&dir, &slug, out.as_deref())
        }
        Commands::Delete { agenda } => commands::delete::run(&dir, &agenda),
    }
}

/// Resolve which agenda a command operates on: an explicit slug, the
/// configured default, or the only agenda there is.
fn resolve_agenda(dir: &AgendaDir, agenda: Option<&str>) -> Result<String> {
    if let Some(slug) = agenda {
        return Ok(slug.to_string());
    }

    if let Some(default) = dir.default_agenda() {
        return Ok(default.to_string());
    }

    let summaries = dir.list()?;
    match summaries.len() {
        0 => anyhow::bail!(
            "No agendas found.\n\n\
            Create your first agenda with:\n  \
            weekgrid new"
        ),
        1 => Ok(summaries[0].slug.clone()),
        _ => {
            let available: Vec<_> = summaries.iter().map(|s| s.slug.clone()).collect();
            anyhow::bail!(
                "Multiple agendas found, pick one with --agenda. Available: {}",
                available.join(", ")
            );
        }
    }
}
