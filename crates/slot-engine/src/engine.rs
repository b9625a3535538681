//! The availability engine: defaults, validation, fetch, merge, expand.
//!
//! [`compute_availability`] is a pure function of its inputs plus one call to the
//! injected [`ScheduleProvider`]. "Now" is always passed in, never read from the clock.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::TemplateCatalog;
use crate::error::{Result, SlotError};
use crate::interval::{alignment, ceil_to_alignment, Interval};
use crate::query::AvailabilityQuery;
use crate::report::AvailabilityResponse;
use crate::schedule::{BusySchedule, ScheduleProvider, UNKNOWN_NAME};
use crate::slots::{
    expand_slots, Constraints, WorkHours, DEFAULT_MINIMUM_NOTICE_HOURS,
    DEFAULT_WORKDAY_END_HOUR, DEFAULT_WORKDAY_START_HOUR,
};
use crate::timeline::compute_common_free_windows;

/// Length of the search window when the caller gives no end.
pub const DEFAULT_SEARCH_DAYS: i64 = 7;

/// Inputs to one availability computation. Unset fields take the documented defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRequest {
    pub subject_ids: Vec<u64>,
    pub duration_minutes: u32,
    /// Defaults to `now + minimum_notice`.
    pub search_start: Option<DateTime<Utc>>,
    /// Defaults to `search_start + 7 days`.
    pub search_end: Option<DateTime<Utc>>,
    pub workday_start_hour: Option<u32>,
    pub workday_end_hour: Option<u32>,
    pub minimum_notice: Duration,
}

impl AvailabilityRequest {
    pub fn new(subject_ids: Vec<u64>, duration_minutes: u32) -> Self {
        Self {
            subject_ids,
            duration_minutes,
            search_start: None,
            search_end: None,
            workday_start_hour: None,
            workday_end_hour: None,
            minimum_notice: Duration::hours(DEFAULT_MINIMUM_NOTICE_HOURS),
        }
    }

    pub fn with_search_window(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.search_start = start;
        self.search_end = end;
        self
    }

    pub fn with_work_hours(mut self, start_hour: Option<u32>, end_hour: Option<u32>) -> Self {
        self.workday_start_hour = start_hour;
        self.workday_end_hour = end_hour;
        self
    }

    pub fn with_minimum_notice(mut self, minimum_notice: Duration) -> Self {
        self.minimum_notice = minimum_notice;
        self
    }
}

/// An interviewer as echoed back in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
}

/// Outcome of [`compute_availability`].
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityResult {
    pub duration_minutes: u32,
    /// Requested interviewers, in request order.
    pub subjects: Vec<Subject>,
    /// Qualifying slots in ascending start order.
    pub slots: Vec<Interval>,
    pub work_hours: WorkHours,
    /// The resolved search window.
    pub search_window: Interval,
    /// Earliest instant any slot may start.
    pub minimum_slot_start: DateTime<Utc>,
    pub free_windows: Vec<Interval>,
    /// Schedules as returned by the provider, kept for the human-readable mirror.
    pub schedules: Vec<BusySchedule>,
}

/// Compute every slot in which all of `request.subject_ids` are free.
///
/// # Errors
/// - `SlotError::InvalidQuery` if the duration is zero, an hour is above 23, or the
///   minimum notice is negative or pushes "now" past the representable range.
/// - `SlotError::InvalidRange` if the resolved window is empty or inverted, or the
///   workday start is not before its end. Nothing is fetched in either case.
/// - `SlotError::Provider` if the schedule fetch fails.
pub fn compute_availability<P>(
    request: &AvailabilityRequest,
    provider: &P,
    now: DateTime<Utc>,
) -> Result<AvailabilityResult>
where
    P: ScheduleProvider + ?Sized,
{
    if request.duration_minutes == 0 {
        return Err(SlotError::InvalidQuery {
            field: "duration_minutes".to_string(),
            message: "duration must be a positive number of minutes".to_string(),
        });
    }

    if request.minimum_notice < Duration::zero() {
        return Err(SlotError::InvalidQuery {
            field: "minimum_notice".to_string(),
            message: "minimum notice must not be negative".to_string(),
        });
    }
    let earliest_allowed = now
        .checked_add_signed(request.minimum_notice)
        .ok_or_else(|| SlotError::InvalidQuery {
            field: "minimum_notice".to_string(),
            message: "minimum notice is out of range".to_string(),
        })?;

    let search_start = request.search_start.unwrap_or(earliest_allowed);
    let search_end = match request.search_end {
        Some(end) => end,
        None => search_start
            .checked_add_signed(Duration::days(DEFAULT_SEARCH_DAYS))
            .ok_or_else(|| SlotError::invalid_range("end", "default search end is out of range"))?,
    };

    let search_window = Interval::new(search_start, search_end)
        .ok_or_else(|| SlotError::invalid_range("end", "end must be after start"))?;

    let work_hours = WorkHours::new(
        request
            .workday_start_hour
            .unwrap_or(DEFAULT_WORKDAY_START_HOUR),
        request.workday_end_hour.unwrap_or(DEFAULT_WORKDAY_END_HOUR),
    )?;

    let constraints = Constraints::new(request.duration_minutes, work_hours)
        .with_minimum_notice(request.minimum_notice);

    // The notice floor applies no matter how early the requested window starts.
    let minimum_slot_start = ceil_to_alignment(search_start.max(earliest_allowed), alignment());

    let schedules = provider.fetch_busy_schedules(&request.subject_ids)?;
    debug!(
        requested = request.subject_ids.len(),
        fetched = schedules.len(),
        "fetched busy schedules"
    );

    let free_windows = compute_common_free_windows(&schedules, &search_window);
    let slots = expand_slots(&free_windows, &constraints, minimum_slot_start);

    let subjects = request
        .subject_ids
        .iter()
        .map(|id| Subject {
            id: *id,
            name: schedules
                .iter()
                .find(|s| s.subject_id == *id)
                .map(|s| s.display_name.clone())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        })
        .collect();

    info!(
        subjects = request.subject_ids.len(),
        duration_minutes = request.duration_minutes,
        free_windows = free_windows.len(),
        slots = slots.len(),
        "computed availability"
    );

    Ok(AvailabilityResult {
        duration_minutes: request.duration_minutes,
        subjects,
        slots,
        work_hours,
        search_window,
        minimum_slot_start,
        free_windows,
        schedules,
    })
}

/// Resolve an interview template, validate the raw query, and build the response.
///
/// # Errors
/// - `SlotError::NotFound` if `template_id` is not in `catalog`. Nothing else runs.
/// - Any error from [`AvailabilityQuery::validate`] or [`compute_availability`].
pub fn availability_for_template<P>(
    catalog: &TemplateCatalog,
    template_id: u64,
    query: &AvailabilityQuery,
    provider: &P,
    now: DateTime<Utc>,
    minimum_notice: Duration,
) -> Result<AvailabilityResponse>
where
    P: ScheduleProvider + ?Sized,
{
    let template = catalog.get(template_id)?;
    let validated = query.validate()?;

    let request = AvailabilityRequest::new(
        template.interviewer_ids.clone(),
        template.duration_minutes,
    )
    .with_search_window(validated.start, validated.end)
    .with_work_hours(validated.start_hour, validated.end_hour)
    .with_minimum_notice(minimum_notice);

    let result = compute_availability(&request, provider, now)?;
    Ok(AvailabilityResponse::new(template.id, &template.name, &result))
}
