//! Schedulable members and their display colors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed palette that members cycle through as they are added.
pub const MEMBER_COLORS: [&str; 8] = [
    "#4f46e5", "#059669", "#d97706", "#dc2626", "#0891b2", "#7c3aed", "#db2777", "#65a30d",
];

/// A schedulable person within one agenda.
///
/// Members are owned by their agenda and only created, renamed, recolored
/// or deleted through the [`ScheduleStore`](crate::store::ScheduleStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Hex display color, e.g. "#4f46e5"
    pub color: String,
}

impl Member {
    pub fn new(name: &str, color: &str) -> Self {
        Member {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Palette color for the `n`th member added to an agenda.
    pub fn color_for(n: usize) -> &'static str {
        MEMBER_COLORS[n % MEMBER_COLORS.len()]
    }
}
