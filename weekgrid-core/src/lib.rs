//! Core types and algorithms for the weekgrid ecosystem.
//!
//! This crate provides everything shared by weekgrid-cli and weekgrid-server:
//! - the agenda data model (`Schedule`, `Member`, `Block`)
//! - date/week utilities, the block indexer, and the conflict detector
//! - the `ScheduleStore` mutation API and plan-limit capability checks
//! - agenda document storage (one JSON document per agenda)

pub mod block;
pub mod config;
pub mod conflict;
pub mod dates;
pub mod error;
pub mod index;
pub mod limits;
pub mod member;
pub mod plan;
pub mod print;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod view;

// Re-export the main types at crate root for convenience
pub use block::{Block, minute_of_day, time_ranges_overlap};
pub use conflict::{Conflict, detect_all_conflicts, detect_conflict};
pub use error::{ScheduleError, ScheduleResult};
pub use limits::PlanLimits;
pub use member::Member;
pub use plan::Plan;
pub use schedule::{FixedPeriod, Schedule, ScheduleSummary, TimeSlotDisplay, UseCase};
pub use storage::AgendaDir;
pub use store::ScheduleStore;
pub use view::{GridView, ViewMode};
