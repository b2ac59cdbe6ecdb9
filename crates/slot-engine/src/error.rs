//! Error types for slot-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised at the boundary of an engine operation.
///
/// Every variant describes a caller mistake. Nothing here is transient, so
/// nothing is worth retrying.
#[derive(Error, Debug)]
pub enum SlotError {
    /// Appointment duration must be a positive number of minutes.
    #[error("Invalid appointment duration: {0} minutes (must be > 0)")]
    InvalidDuration(u32),

    /// Picker precision must be between 1 and 1440 minutes.
    #[error("Invalid picker precision: {0} minutes (must be 1..=1440)")]
    InvalidPrecision(u32),

    #[error("Invalid time of day: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u32, minute: u32 },

    /// A range whose end precedes its start.
    #[error("Invalid time range: end {end} is before start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// An opening-hours slot whose start is not before its end.
    #[error("Invalid opening-hours slot: {0}")]
    InvalidSlot(String),

    /// A name or textual value that could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, SlotError>;
