//! Validation of raw availability query parameters.
//!
//! Checks each field on its own, then the cross-field orderings that can be decided
//! from the supplied values alone. Defaults are applied later by the engine, which
//! re-checks the orderings once the missing bounds are filled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::parse_iso8601;

/// Query parameters as they arrive from a caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub start_hour: Option<i64>,
    #[serde(default)]
    pub end_hour: Option<i64>,
}

/// A query whose fields have been parsed and range-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
}

impl AvailabilityQuery {
    pub fn validate(&self) -> Result<ValidatedQuery> {
        let start = parse_instant("start", self.start.as_deref())?;
        let end = parse_instant("end", self.end.as_deref())?;
        let start_hour = parse_hour("start_hour", self.start_hour)?;
        let end_hour = parse_hour("end_hour", self.end_hour)?;

        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                return Err(SlotError::invalid_range("end", "end must be after start"));
            }
        }

        if let (Some(sh), Some(eh)) = (start_hour, end_hour) {
            if sh >= eh {
                return Err(SlotError::invalid_range("end_hour", "end_hour must be after start_hour"));
            }
        }

        Ok(ValidatedQuery {
            start,
            end,
            start_hour,
            end_hour,
        })
    }
}

fn parse_instant(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|s| {
        parse_iso8601(s).map_err(|e| SlotError::InvalidQuery {
            field: field.to_string(),
            message: format!("Datetime has wrong format ({}): {}", e, s),
        })
    })
    .transpose()
}

fn parse_hour(field: &str, raw: Option<i64>) -> Result<Option<u32>> {
    match raw {
        None => Ok(None),
        Some(h) if h < 0 => Err(SlotError::InvalidQuery {
            field: field.to_string(),
            message: "Ensure this value is greater than or equal to 0.".to_string(),
        }),
        Some(h) if h > 23 => Err(SlotError::InvalidQuery {
            field: field.to_string(),
            message: "Ensure this value is less than or equal to 23.".to_string(),
        }),
        Some(h) => Ok(Some(h as u32)),
    }
}
