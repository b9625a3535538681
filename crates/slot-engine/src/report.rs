//! The outbound availability payload and its human-readable mirror.
//!
//! The mirror is derived from the same typed values as the authoritative fields, so
//! the two can never disagree.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::{AvailabilityResult, Subject};
use crate::interval::{to_iso8601_utc, Interval};
use crate::schedule::BusySchedule;
use crate::slots::WorkHours;

/// A `{start, end}` pair of formatted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDto {
    pub start: String,
    pub end: String,
}

impl SlotDto {
    /// UTC ISO 8601 with trailing `Z`.
    pub fn iso(interval: &Interval) -> Self {
        Self {
            start: to_iso8601_utc(interval.start()),
            end: to_iso8601_utc(interval.end()),
        }
    }

    fn human(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: format_human_readable(start),
            end: format_human_readable(end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerBusyTimes {
    pub interviewer_id: u64,
    pub name: String,
    pub busy_times: Vec<SlotDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanReadable {
    pub available_slots: Vec<SlotDto>,
    pub interviewer_busy_times: Vec<InterviewerBusyTimes>,
    /// e.g. `"9:00 - 17:00"`.
    pub work_hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub interview_id: u64,
    pub name: String,
    pub duration_minutes: u32,
    pub interviewers: Vec<Subject>,
    pub available_slots: Vec<SlotDto>,
    pub work_hours: WorkHours,
    pub human_readable: HumanReadable,
}

impl AvailabilityResponse {
    pub fn new(interview_id: u64, name: &str, result: &AvailabilityResult) -> Self {
        Self {
            interview_id,
            name: name.to_string(),
            duration_minutes: result.duration_minutes,
            interviewers: result.subjects.clone(),
            available_slots: result.slots.iter().map(SlotDto::iso).collect(),
            work_hours: result.work_hours,
            human_readable: HumanReadable {
                available_slots: result
                    .slots
                    .iter()
                    .map(|slot| SlotDto::human(slot.start(), slot.end()))
                    .collect(),
                interviewer_busy_times: busy_times_human_readable(&result.schedules),
                work_hours: format_work_hours(result.work_hours),
            },
        }
    }
}

/// Format an instant as e.g. `"Monday, September 7, 2025 at 2:00 PM"` (UTC).
pub fn format_human_readable(instant: DateTime<Utc>) -> String {
    instant.format("%A, %B %-d, %Y at %-I:%M %p").to_string()
}

pub fn format_work_hours(work_hours: WorkHours) -> String {
    format!("{}:00 - {}:00", work_hours.start_hour, work_hours.end_hour)
}

/// Every busy block whose bounds parse, per interviewer, in provider order.
pub fn busy_times_human_readable(schedules: &[BusySchedule]) -> Vec<InterviewerBusyTimes> {
    schedules
        .iter()
        .map(|schedule| InterviewerBusyTimes {
            interviewer_id: schedule.subject_id,
            name: schedule.display_name.clone(),
            busy_times: schedule
                .busy
                .iter()
                .filter_map(|block| block.bounds())
                .map(|(start, end)| SlotDto::human(start, end))
                .collect(),
        })
        .collect()
}
