//! Printable projection of an agenda.
//!
//! A flat row list that an external renderer (terminal, file export)
//! turns into a document. No layout or pagination happens here; the
//! projection is pure and covers the currently displayed week.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::week_days;
use crate::schedule::Schedule;

/// One member-date-block line of the printed agenda.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintRow {
    pub member_name: String,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub label: Option<String>,
    /// Period label when the block belongs to a fixed period.
    pub period_label: Option<String>,
}

/// The full printable view of one week.
#[derive(Debug, Clone, Serialize)]
pub struct PrintableView {
    pub agenda_name: String,
    pub week_start: NaiveDate,
    pub rows: Vec<PrintRow>,
    /// Whether the export must carry the promotional watermark.
    pub watermark: bool,
}

/// Project the displayed week into flat rows, sorted by date, then by
/// the agenda's member order, then by start time.
pub fn printable_view(schedule: &Schedule, watermark: bool) -> PrintableView {
    let week: Vec<NaiveDate> = week_days(schedule.current_week_start);

    let member_position = |id: &str| schedule.members.iter().position(|m| m.id == id);

    let mut rows: Vec<(usize, PrintRow)> = Vec::new();
    for block in &schedule.blocks {
        if !week.contains(&block.date) {
            continue;
        }

        let period_label = block
            .period
            .as_deref()
            .and_then(|id| schedule.period(id))
            .map(|p| p.label.clone());

        for member_id in &block.member_ids {
            let Some(position) = member_position(member_id) else {
                continue;
            };
            rows.push((
                position,
                PrintRow {
                    member_name: schedule.members[position].name.clone(),
                    date: block.date,
                    start: block.start.clone(),
                    end: block.end.clone(),
                    label: block.label.clone(),
                    period_label: period_label.clone(),
                },
            ));
        }
    }

    rows.sort_by(|(pos_a, a), (pos_b, b)| {
        (a.date, *pos_a, &a.start).cmp(&(b.date, *pos_b, &b.start))
    });

    PrintableView {
        agenda_name: schedule.name.clone(),
        week_start: schedule.current_week_start,
        rows: rows.into_iter().map(|(_, row)| row).collect(),
        watermark,
    }
}
