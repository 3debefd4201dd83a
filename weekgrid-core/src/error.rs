//! Error types for the weekgrid ecosystem.

use thiserror::Error;

/// Errors that can occur in weekgrid operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agenda not found: {0}")]
    AgendaNotFound(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Block must end after it starts (got {start}-{end})")]
    EmptyTimeRange { start: String, end: String },

    #[error("Block has no members assigned")]
    NoMembers,

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Agenda '{0}' uses fixed periods but defines none")]
    MissingPeriods(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for weekgrid operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
