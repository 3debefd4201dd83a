//! Time blocks: one assignment of one or more members to a time interval.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};

/// A single time-interval assignment on one calendar date.
///
/// Multiple member ids on one block mean those members share this exact
/// slot (a co-assigned shift), not N independent blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Defaults to empty when deserialized without one (a candidate
    /// block that was never committed); persisted blocks always carry a
    /// generated id.
    #[serde(default)]
    pub id: String,
    pub member_ids: Vec<String>,
    pub date: NaiveDate,
    /// "HH:MM", 24-hour
    pub start: String,
    /// "HH:MM", strictly after `start`. Fixed-period agendas may fill
    /// both from the period's default times.
    pub end: String,
    /// Free-text caption shown inside the cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// References `FixedPeriod.id`. Kept separate from `label` so a
    /// user-entered caption can never break period matching.
    #[serde(rename = "periodId", default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Groups blocks stamped together across a week so they can be
    /// removed as one unit.
    #[serde(rename = "patternId", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Block {
    pub fn new(member_ids: Vec<String>, date: NaiveDate, start: &str, end: &str) -> Self {
        Block {
            id: Uuid::new_v4().to_string(),
            member_ids,
            date,
            start: start.to_string(),
            end: end.to_string(),
            label: None,
            period: None,
            pattern: None,
        }
    }

    /// Start as minutes from midnight.
    pub fn start_minutes(&self) -> ScheduleResult<u32> {
        minute_of_day(&self.start)
    }

    /// End as minutes from midnight.
    pub fn end_minutes(&self) -> ScheduleResult<u32> {
        minute_of_day(&self.end)
    }

    /// Check the block invariants: at least one member, parseable times,
    /// and a non-empty time range.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.member_ids.is_empty() {
            return Err(ScheduleError::NoMembers);
        }

        let start = self.start_minutes()?;
        let end = self.end_minutes()?;
        if start >= end {
            return Err(ScheduleError::EmptyTimeRange {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }

        Ok(())
    }

    /// Member ids present on both blocks, in this block's order.
    pub fn shared_members(&self, other: &Block) -> Vec<String> {
        self.member_ids
            .iter()
            .filter(|id| other.member_ids.contains(id))
            .cloned()
            .collect()
    }
}

/// Parse "HH:MM" into minutes from midnight.
pub fn minute_of_day(s: &str) -> ScheduleResult<u32> {
    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Half-open interval overlap on minutes of day: touching boundaries
/// (one range ending exactly where the next starts) do not overlap.
pub fn time_ranges_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}
