//! Error types for work-center scheduling.
//!
//! Calendar defects are recoverable and only surface from the loaders;
//! duration defects flag a single job; overflow and corrupt instants abort
//! a work center's run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::WorkCenter;

/// Fatal errors for one work center's scheduling run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The calendar walk for a job exceeded the cycle cap.
    #[error(
        "schedule overflow: job '{job_id}' on {work_center} did not fit within {max_cycles} calendar cycles"
    )]
    Overflow {
        job_id: String,
        work_center: WorkCenter,
        max_cycles: u32,
    },

    /// Date arithmetic produced an instant that cannot be represented.
    #[error("invalid instant while scheduling job '{job_id}': {detail}")]
    InvalidInstant { job_id: String, detail: String },

    /// A non-positive duration was handed to the calendar walk.
    #[error("cannot place job '{job_id}': {reason}")]
    InvalidDuration {
        job_id: String,
        reason: DurationError,
    },
}

/// Result type alias for scheduling runs.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Problems found while reading calendar data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A window string is not of the form `HH:MM-HH:MM` with open <= close.
    #[error("invalid calendar entry: {0}")]
    InvalidEntry(String),

    /// A column or job label does not name a known work center.
    #[error("unknown work center: {0}")]
    UnknownWorkCenter(String),

    /// A row label is neither a weekday nor a date.
    #[error("unrecognized day label: {0}")]
    UnknownDayLabel(String),
}

/// Input field a duration was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationField {
    ProductionQuantity,
    BalanceQuantity,
    UnitsPerHour,
    SetupMinutes,
}

/// Reasons a job's processing duration cannot be computed.
///
/// A job carrying one of these is flagged and left out of the chain.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationError {
    #[error("invalid duration input: {field:?} is not a finite number")]
    NonFinite { field: DurationField },

    #[error("invalid duration input: units per hour must be positive, got {rate}")]
    NonPositiveRate { rate: f64 },

    #[error("invalid duration input: quantity to produce is negative ({quantity})")]
    NegativeQuantity { quantity: f64 },

    #[error("invalid duration input: setup minutes are negative ({minutes})")]
    NegativeSetup { minutes: f64 },

    #[error("invalid duration input: job has no work left to schedule")]
    ZeroDuration,

    #[error("invalid duration input: duration of {hours} hours is out of range")]
    OutOfRange { hours: f64 },
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_cycles must be at least 1")]
    InvalidMaxCycles,

    #[error("default window rejected: {0}")]
    DefaultWindow(#[from] CalendarError),
}
