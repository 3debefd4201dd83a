//! TUI rendering for weekgrid-core types.
//!
//! Extension traits and helpers that turn composed grids, conflicts, and
//! printable views into colored terminal output using owo_colors.

use owo_colors::OwoColorize;
use weekgrid_core::print::PrintableView;
use weekgrid_core::view::{DayTimeline, GridView, HOUR_ROW_HEIGHT_PX, MonthGrid, PeriodGrid, WeekGrid};
use weekgrid_core::{Conflict, Member, Schedule, ScheduleSummary};

const MEMBER_COL: usize = 12;
const DAY_COL: usize = 14;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScheduleSummary {
    fn render(&self) -> String {
        let counts = format!(
            "{} members, {} blocks",
            self.member_count, self.block_count
        );
        // Pad before coloring; escape codes take no visible width
        format!("{} {}", pad(&self.slug, 20).bold(), counts.dimmed())
    }
}

impl Render for Member {
    fn render(&self) -> String {
        format!("{} {}", swatch(&self.color), self.name)
    }
}

/// Colored swatch dot for a member's hex color, plain when the hex
/// doesn't parse.
pub fn swatch(color: &str) -> String {
    match hex_to_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Describe a detected double-booking, resolving block times from the
/// agenda.
pub fn render_conflict(conflict: &Conflict, schedule: &Schedule) -> String {
    let who = conflict.member_names.join(", ");
    let when = conflict.date.format("%a %b %-d").to_string();

    let times = match (
        schedule.block(&conflict.block_id),
        schedule.block(&conflict.other_block_id),
    ) {
        (Some(a), Some(b)) => format!("{}-{} overlaps {}-{}", b.start, b.end, a.start, a.end),
        _ => "overlapping blocks".to_string(),
    };

    format!(
        "{} {} double-booked on {}: {}",
        "!".red().bold(),
        who.bold(),
        when,
        times.yellow()
    )
}

/// Render a composed grid for the terminal.
pub fn render_grid(view: &GridView, schedule: &Schedule) -> String {
    match view {
        GridView::Week(grid) => render_week(grid, schedule),
        GridView::Periods(grid) => render_periods(grid, schedule),
        GridView::Month(grid) => render_month(grid),
        GridView::Day(timeline) => render_day(timeline, schedule),
    }
}

fn pad(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

fn render_week(grid: &WeekGrid, _schedule: &Schedule) -> String {
    let mut lines = Vec::new();

    let mut header = " ".repeat(MEMBER_COL);
    for day in &grid.days {
        header.push_str(&pad(&day.format("%a %b %-d").to_string(), DAY_COL));
    }
    lines.push(header.bold().to_string());

    for row in &grid.rows {
        let mut line = String::new();
        line.push_str(&format!(
            "{} {}",
            swatch(&row.member.color),
            pad(&row.member.name, MEMBER_COL - 2)
        ));
        for cell in &row.cells {
            let text = match cell.as_slice() {
                [] => "·".dimmed().to_string() + &" ".repeat(DAY_COL - 1),
                [block] => pad(&format!("{}-{}", block.start, block.end), DAY_COL),
                [block, rest @ ..] => {
                    let more = format!("+{}", rest.len());
                    pad(
                        &format!("{}-{} {}", block.start, block.end, more),
                        DAY_COL,
                    )
                }
            };
            line.push_str(&text);
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_periods(grid: &PeriodGrid, _schedule: &Schedule) -> String {
    let mut lines = Vec::new();

    let period_col = grid.periods.iter().map(|p| p.label.len() + 2).max().unwrap_or(6);

    let mut header = " ".repeat(MEMBER_COL);
    for day in &grid.days {
        header.push_str(&pad(
            &day.format("%a %b %-d").to_string(),
            period_col * grid.periods.len() + 2,
        ));
    }
    lines.push(header.bold().to_string());

    let mut subheader = " ".repeat(MEMBER_COL);
    for _ in &grid.days {
        for period in &grid.periods {
            subheader.push_str(&pad(&period.label, period_col));
        }
        subheader.push_str("  ");
    }
    lines.push(subheader.dimmed().to_string());

    for row in &grid.rows {
        let mut line = String::new();
        line.push_str(&format!(
            "{} {}",
            swatch(&row.member.color),
            pad(&row.member.name, MEMBER_COL - 2)
        ));
        for day_cells in &row.cells {
            for cell in day_cells {
                let mark = match cell.len() {
                    0 => "·".dimmed().to_string(),
                    1 => "✓".green().to_string(),
                    n => n.to_string(),
                };
                // The mark renders as one visible char; pad manually
                line.push_str(&mark);
                line.push_str(&" ".repeat(period_col - 1));
            }
            line.push_str("  ");
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_month(grid: &MonthGrid) -> String {
    let mut lines = Vec::new();

    let mut header = String::new();
    for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
        header.push_str(&pad(name, DAY_COL));
    }
    lines.push(header.bold().to_string());

    for week in grid.cells.chunks(7) {
        let mut line = String::new();
        for cell in week {
            let day_number = format!("{:>2}", cell.day.date.format("%-d"));

            // Swatches carry their own colors; style only the number so
            // escape codes never nest. Visible width is tracked by hand
            // because the color codes take no columns.
            let styled_number = if cell.day.is_today {
                day_number.bold().to_string()
            } else if cell.day.is_current_month {
                day_number.clone()
            } else {
                day_number.dimmed().to_string()
            };

            let mut marks = String::new();
            let mut visible = 2;
            if cell.block_count > 0 {
                marks.push(' ');
                visible += 1;
                for color in &cell.swatches {
                    marks.push_str(&swatch(color));
                    visible += 1;
                }
                if cell.overflow > 0 {
                    let more = format!("+{}", cell.overflow);
                    visible += more.len();
                    marks.push_str(&more);
                }
            }

            line.push_str(&styled_number);
            line.push_str(&marks);
            line.push_str(&" ".repeat(DAY_COL.saturating_sub(visible)));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_day(timeline: &DayTimeline, schedule: &Schedule) -> String {
    let mut lines = Vec::new();
    lines.push(
        timeline
            .date
            .format("%A, %B %-d")
            .to_string()
            .bold()
            .to_string(),
    );

    for row in &timeline.hours {
        let mut line = format!("{:02}:00 {}", row.hour, "|".dimmed());
        for positioned in &row.blocks {
            let block = positioned.block;
            // Proportional indent mirrors the pixel offset within the row
            let indent = (positioned.offset_px / HOUR_ROW_HEIGHT_PX * 6.0).round() as usize;
            let members: Vec<&str> = block
                .member_ids
                .iter()
                .filter_map(|id| schedule.member_name(id))
                .collect();
            let label = block
                .label
                .as_deref()
                .map(|l| format!(" {}", l))
                .unwrap_or_default();
            line.push_str(&format!(
                " {}{}-{}{} ({})",
                " ".repeat(indent),
                block.start,
                block.end,
                label,
                members.join(", ").dimmed()
            ));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Render the printable projection as a plain text document.
pub fn render_printable(view: &PrintableView) -> String {
    let mut lines = Vec::new();

    let title = format!(
        "{}  (week of {})",
        view.agenda_name,
        view.week_start.format("%Y-%m-%d")
    );
    lines.push(title.clone());
    lines.push("=".repeat(title.chars().count()));
    lines.push(String::new());

    let mut current_date = None;
    for row in &view.rows {
        if current_date != Some(row.date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(row.date.format("%A %Y-%m-%d").to_string());
            current_date = Some(row.date);
        }

        let slot = match &row.period_label {
            Some(period) => period.clone(),
            None => format!("{}-{}", row.start, row.end),
        };
        let label = row
            .label
            .as_deref()
            .map(|l| format!("  {}", l))
            .unwrap_or_default();
        lines.push(format!("  {:<12} {}{}", row.member_name, slot, label));
    }

    if view.rows.is_empty() {
        lines.push("(empty week)".to_string());
    }

    if view.watermark {
        lines.push(String::new());
        lines.push("Made with weekgrid. Go pro to remove this line.".to_string());
    }

    lines.push(String::new());
    lines.join("\n")
}
