//! Expand common-free windows into fixed-length, half-hour-aligned slots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::{alignment, ceil_to_alignment, Interval};

pub const DEFAULT_WORKDAY_START_HOUR: u32 = 9;
pub const DEFAULT_WORKDAY_END_HOUR: u32 = 17;
pub const DEFAULT_MINIMUM_NOTICE_HOURS: i64 = 24;

/// Hours of the UTC day during which slots may be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkHours {
    /// Both hours must lie in `0..=23` and `start_hour < end_hour`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour > 23 {
            return Err(SlotError::InvalidQuery {
                field: "start_hour".to_string(),
                message: "Ensure this value is less than or equal to 23.".to_string(),
            });
        }
        if end_hour > 23 {
            return Err(SlotError::InvalidQuery {
                field: "end_hour".to_string(),
                message: "Ensure this value is less than or equal to 23.".to_string(),
            });
        }
        if start_hour >= end_hour {
            return Err(SlotError::invalid_range("end_hour", "end_hour must be after start_hour"));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_WORKDAY_START_HOUR,
            end_hour: DEFAULT_WORKDAY_END_HOUR,
        }
    }
}

/// Everything a slot must satisfy apart from being free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub duration_minutes: u32,
    pub work_hours: WorkHours,
    /// No slot may start earlier than this long after "now".
    pub minimum_notice: Duration,
}

impl Constraints {
    pub fn new(duration_minutes: u32, work_hours: WorkHours) -> Self {
        Self {
            duration_minutes,
            work_hours,
            minimum_notice: Duration::hours(DEFAULT_MINIMUM_NOTICE_HOURS),
        }
    }

    pub fn with_minimum_notice(mut self, minimum_notice: Duration) -> Self {
        self.minimum_notice = minimum_notice;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// True if `slot` lies inside the working hours of its start's UTC date.
///
/// The workday is anchored to the slot start, so a slot may end exactly at closing
/// time but may never run past midnight into the next day's hours.
pub fn is_within_workday(slot: &Interval, work_hours: WorkHours) -> bool {
    let date = slot.start().date_naive();
    let (Some(open), Some(close)) = (
        date.and_hms_opt(work_hours.start_hour, 0, 0),
        date.and_hms_opt(work_hours.end_hour, 0, 0),
    ) else {
        return false;
    };

    open.and_utc() <= slot.start() && slot.end() <= close.and_utc()
}

/// Walk each free window on the half-hour grid and emit every slot that fits.
///
/// Candidates start at `ceil(max(window.start, minimum_slot_start))` and advance by 30
/// minutes whether or not the previous candidate passed the workday test. Output keeps
/// window order, then ascending start.
pub fn expand_slots(
    windows: &[Interval],
    constraints: &Constraints,
    minimum_slot_start: DateTime<Utc>,
) -> Vec<Interval> {
    let duration = constraints.duration();
    let step = alignment();
    let mut slots = Vec::new();

    if duration <= Duration::zero() {
        return slots;
    }

    for window in windows {
        let mut candidate = ceil_to_alignment(window.start().max(minimum_slot_start), step);
        let Some(last_valid_start) = window.end().checked_sub_signed(duration) else {
            continue;
        };

        while candidate <= last_valid_start {
            if let Some(slot) = candidate
                .checked_add_signed(duration)
                .and_then(|end| Interval::new(candidate, end))
            {
                if is_within_workday(&slot, constraints.work_hours) {
                    slots.push(slot);
                }
            }
            match candidate.checked_add_signed(step) {
                Some(next) => candidate = next,
                None => break,
            }
        }
    }

    debug!(
        windows = windows.len(),
        slots = slots.len(),
        duration_minutes = constraints.duration_minutes,
        "expanded free windows into slots"
    );

    slots
}
