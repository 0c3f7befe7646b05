//! Error types for timetable synchronization.

use thiserror::Error;

/// Errors that can abort a sync pass (or startup, for `Config`).
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Unknown weekday '{0}'")]
    InvalidWeekday(String),

    #[error("Lesson start time '{0}' does not match any lesson slot")]
    UnknownSlot(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid lesson time range '{0}', expected HH:MM-HH:MM")]
    InvalidTimeRange(String),

    #[error("Invalid week number '{0}'")]
    InvalidWeek(String),

    #[error("Schedule source error: {0}")]
    Source(String),

    #[error("Calendar store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
