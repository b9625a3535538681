//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Interview template not found: {0}")]
    NotFound(u64),

    #[error("Invalid range for '{field}': {message}")]
    InvalidRange { field: String, message: String },

    #[error("Invalid query parameter '{field}': {message}")]
    InvalidQuery { field: String, message: String },

    #[error("Schedule provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl SlotError {
    /// Range errors are attributed to the upper bound (`end` or `end_hour`).
    pub fn invalid_range(field: &str, message: impl Into<String>) -> Self {
        SlotError::InvalidRange {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The request field this error is attributed to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            SlotError::InvalidQuery { field, .. } | SlotError::InvalidRange { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

/// Failures raised by a [`ScheduleProvider`](crate::schedule::ScheduleProvider).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to read schedules: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse schedules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schedule source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
