//! The agenda aggregate: members, blocks, and display configuration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::block::Block;
use crate::dates::monday_of;
use crate::error::{ScheduleError, ScheduleResult};
use crate::member::Member;

/// How a day is subdivided when placing blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeSlotDisplay {
    /// Literal start and end times per block.
    PreciseHours,
    /// Named periods ("Morning", "Evening") instead of literal times.
    FixedPeriods,
    /// One slot spanning the whole day.
    FullDay,
}

/// What the agenda is used for. Rotation agendas keep the period-row
/// layout even in week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    #[default]
    General,
    Rotation,
}

/// A named, non-time-precise subdivision of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPeriod {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_end: Option<String>,
}

impl FixedPeriod {
    pub fn new(label: &str, default_start: Option<&str>, default_end: Option<&str>) -> Self {
        FixedPeriod {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
            default_start: default_start.map(String::from),
            default_end: default_end.map(String::from),
        }
    }
}

/// The aggregate root. Members and blocks exist only inside exactly one
/// schedule; the schedule is also the unit of persistence (saved and
/// replaced as a whole document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
    pub blocks: Vec<Block>,
    /// Monday of the displayed week.
    pub current_week_start: NaiveDate,
    pub time_slot_display: TimeSlotDisplay,
    /// Required and non-empty when `time_slot_display` is fixed-periods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_periods: Vec<FixedPeriod>,
    /// Day indexes shown in week views; 0 is Monday, 6 is Sunday.
    pub active_days: Vec<u8>,
    #[serde(default)]
    pub use_case: UseCase,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    /// An empty agenda displaying the week containing `today`.
    pub fn new(name: &str, display: TimeSlotDisplay, today: NaiveDate) -> Self {
        Schedule {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            members: Vec::new(),
            blocks: Vec::new(),
            current_week_start: monday_of(today),
            time_slot_display: display,
            fixed_periods: Vec::new(),
            active_days: (0..7).collect(),
            use_case: UseCase::default(),
            created_at: Utc::now(),
        }
    }

    /// The standard period set seeded by the creation wizard.
    pub fn default_periods() -> Vec<FixedPeriod> {
        vec![
            FixedPeriod::new("Morning", Some("08:00"), Some("12:00")),
            FixedPeriod::new("Afternoon", Some("12:00"), Some("17:00")),
            FixedPeriod::new("Evening", Some("17:00"), Some("21:00")),
        ]
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn member_name(&self, id: &str) -> Option<&str> {
        self.member(id).map(|m| m.name.as_str())
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn period(&self, id: &str) -> Option<&FixedPeriod> {
        self.fixed_periods.iter().find(|p| p.id == id)
    }

    pub fn period_by_label(&self, label: &str) -> Option<&FixedPeriod> {
        self.fixed_periods
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(label))
    }

    /// Where blocks without a `periodId` land in period grids.
    pub fn fallback_period(&self) -> Option<&FixedPeriod> {
        self.fixed_periods.first()
    }

    /// Check the aggregate invariants: week start on a Monday, valid
    /// member references, and periods present when the display needs them.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.current_week_start != monday_of(self.current_week_start) {
            return Err(ScheduleError::InvalidDate(format!(
                "currentWeekStart {} is not a Monday",
                self.current_week_start
            )));
        }

        if self.time_slot_display == TimeSlotDisplay::FixedPeriods && self.fixed_periods.is_empty()
        {
            return Err(ScheduleError::MissingPeriods(self.name.clone()));
        }

        for block in &self.blocks {
            block.validate()?;
            for member_id in &block.member_ids {
                if self.member(member_id).is_none() {
                    return Err(ScheduleError::UnknownMember(member_id.clone()));
                }
            }
        }

        Ok(())
    }

    pub fn summary(&self, slug: &str) -> ScheduleSummary {
        ScheduleSummary {
            id: self.id.clone(),
            slug: slug.to_string(),
            name: self.name.clone(),
            member_count: self.members.len(),
            block_count: self.blocks.len(),
            created_at: self.created_at,
        }
    }
}

/// Lightweight listing entry for an agenda on disk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub member_count: usize,
    pub block_count: usize,
    pub created_at: DateTime<Utc>,
}
