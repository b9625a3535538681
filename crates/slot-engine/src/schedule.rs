//! Busy schedules and the providers that supply them.
//!
//! A [`BusySchedule`] is the wire shape a calendar source hands the engine: one
//! interviewer plus their busy blocks as raw ISO 8601 strings. Blocks stay raw until
//! the merger reads them so that one malformed block degrades to "skipped" instead of
//! failing the whole fetch.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::interval::{parse_iso8601, to_iso8601_utc, Interval};

/// Display name used when a source does not know who an interviewer is.
pub const UNKNOWN_NAME: &str = "Unknown";

fn unknown_name() -> String {
    UNKNOWN_NAME.to_string()
}

/// One busy block as delivered by a schedule source.
///
/// Either bound may be missing or unparseable; such blocks are ignored downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusyBlock {
    #[serde(default, alias = "startTime", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, alias = "endTime", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl BusyBlock {
    /// Build a block from two instants, formatted as UTC with a trailing `Z`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(to_iso8601_utc(start)),
            end: Some(to_iso8601_utc(end)),
        }
    }

    /// Both bounds, parsed to UTC, if present and well-formed.
    ///
    /// The pair may still be inverted; see [`BusyBlock::interval`].
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_iso8601(self.start.as_deref()?).ok()?;
        let end = parse_iso8601(self.end.as_deref()?).ok()?;
        Some((start, end))
    }

    /// The block as a valid interval, or `None` if it is malformed or `start >= end`.
    pub fn interval(&self) -> Option<Interval> {
        let (start, end) = self.bounds()?;
        Interval::new(start, end)
    }
}

/// An interviewer's identity plus their unavailability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusySchedule {
    #[serde(rename = "interviewerId")]
    pub subject_id: u64,
    #[serde(rename = "name", default = "unknown_name")]
    pub display_name: String,
    #[serde(default)]
    pub busy: Vec<BusyBlock>,
}

impl BusySchedule {
    pub fn new(subject_id: u64, display_name: impl Into<String>, busy: Vec<BusyBlock>) -> Self {
        Self {
            subject_id,
            display_name: display_name.into(),
            busy,
        }
    }

    /// The well-formed busy intervals of this schedule, in source order.
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.busy.iter().filter_map(BusyBlock::interval)
    }
}

/// Source of busy schedules for a set of interviewers.
///
/// Implementations return one entry per requested id, in any order. This is the
/// only fallible collaborator the engine calls; its errors are passed through as-is.
pub trait ScheduleProvider: Send + Sync {
    fn fetch_busy_schedules(&self, subject_ids: &[u64]) -> Result<Vec<BusySchedule>, ProviderError>;
}

impl<F> ScheduleProvider for F
where
    F: Fn(&[u64]) -> Result<Vec<BusySchedule>, ProviderError> + Send + Sync,
{
    fn fetch_busy_schedules(&self, subject_ids: &[u64]) -> Result<Vec<BusySchedule>, ProviderError> {
        self(subject_ids)
    }
}

/// A provider backed by a fixed set of schedules held in memory.
///
/// Ids it has never seen are answered with an empty schedule named `"Unknown"`.
#[derive(Debug, Clone, Default)]
pub struct StaticScheduleProvider {
    schedules: BTreeMap<u64, BusySchedule>,
}

impl StaticScheduleProvider {
    pub fn new(schedules: impl IntoIterator<Item = BusySchedule>) -> Self {
        Self {
            schedules: schedules
                .into_iter()
                .map(|schedule| (schedule.subject_id, schedule))
                .collect(),
        }
    }

    /// Load from a JSON array of `{"interviewerId", "name", "busy": [...]}` objects.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let schedules: Vec<BusySchedule> = serde_json::from_str(json)?;
        Ok(Self::new(schedules))
    }

    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

impl ScheduleProvider for StaticScheduleProvider {
    fn fetch_busy_schedules(&self, subject_ids: &[u64]) -> Result<Vec<BusySchedule>, ProviderError> {
        Ok(subject_ids
            .iter()
            .map(|id| {
                self.schedules
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| BusySchedule::new(*id, UNKNOWN_NAME, Vec::new()))
            })
            .collect())
    }
}
