//! Error types for planner-engine boundary parsing.
//!
//! The temporal computations themselves never fail; only turning caller text
//! into typed values can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid local datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid clock time (expected HH:MM): {0}")]
    InvalidClockTime(String),

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid opening interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
