//! Merge per-interviewer busy schedules into common-free windows.
//!
//! Every busy interval becomes a `+1` event at its start and a `-1` event at its end.
//! After sorting, a single left-to-right sweep tracks how many people are busy; the
//! stretches where that count is zero are the windows in which everyone is free.

use chrono::{DateTime, Timelike, Utc};
use tracing::debug;

use crate::interval::Interval;
use crate::schedule::BusySchedule;

/// A change in the number of busy people at one instant.
///
/// `at` is in epoch microseconds so equal instants compare exactly. Busy bounds are
/// rounded outward to the microsecond and the search window inward, so a free window
/// never covers any part of a busy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SweepEvent {
    pub at: i64,
    /// `+1` someone becomes busy, `-1` someone becomes free, `0` search-window boundary.
    pub delta: i8,
}

/// Build the sorted event stream for `schedules` clipped to `search_window`.
///
/// Events are ordered by `(at, delta)`, so at a shared instant every `-1` is applied
/// before any `+1`. A busy block ending exactly when another begins therefore leaves
/// that instant free, matching half-open semantics.
pub fn sweep_events(schedules: &[BusySchedule], search_window: &Interval) -> Vec<SweepEvent> {
    let mut events = Vec::new();
    let (window_start, window_end) = window_micros(search_window);

    for schedule in schedules {
        for block in &schedule.busy {
            let Some(busy) = block.interval() else {
                debug!(
                    subject_id = schedule.subject_id,
                    start = ?block.start,
                    end = ?block.end,
                    "skipping malformed busy block"
                );
                continue;
            };
            // Blocks entirely outside the search window contribute nothing.
            if let Some(clipped) = busy.intersect(search_window) {
                events.push(SweepEvent {
                    at: floor_micros(clipped.start()).max(window_start),
                    delta: 1,
                });
                events.push(SweepEvent {
                    at: ceil_micros(clipped.end()).min(window_end),
                    delta: -1,
                });
            }
        }
    }

    // Boundary markers make the sweep reach both ends of the window even with no busy data.
    events.push(SweepEvent {
        at: window_start,
        delta: 0,
    });
    events.push(SweepEvent {
        at: window_end,
        delta: 0,
    });

    events.sort_by_key(|e| (e.at, e.delta));
    events
}

/// Compute the windows within `search_window` where nobody in `schedules` is busy.
///
/// Returns sorted, non-overlapping intervals. With no busy data the result is the
/// whole search window. Malformed blocks (missing or unparseable bounds, or
/// `start >= end`) are skipped.
pub fn compute_common_free_windows(
    schedules: &[BusySchedule],
    search_window: &Interval,
) -> Vec<Interval> {
    let events = sweep_events(schedules, search_window);

    let mut free_windows = Vec::new();
    let mut active_busy: i64 = 0;
    let mut prev = window_micros(search_window).0;

    for group in events.chunk_by(|a, b| a.at == b.at) {
        let at = group[0].at;

        if active_busy == 0 && at > prev {
            if let Some(window) = interval_from_micros(prev, at) {
                free_windows.push(window);
            }
        }

        // Apply every delta at this instant before moving on.
        active_busy += group.iter().map(|e| i64::from(e.delta)).sum::<i64>();
        prev = at;
    }

    debug!(
        subjects = schedules.len(),
        events = events.len(),
        windows = free_windows.len(),
        "computed common-free windows"
    );

    free_windows
}

/// Same as [`compute_common_free_windows`], taking raw bounds.
///
/// An empty or inverted search window yields no free windows.
pub fn common_free_windows_between(
    schedules: &[BusySchedule],
    search_start: DateTime<Utc>,
    search_end: DateTime<Utc>,
) -> Vec<Interval> {
    match Interval::new(search_start, search_end) {
        Some(window) => compute_common_free_windows(schedules, &window),
        None => Vec::new(),
    }
}

fn floor_micros(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

fn ceil_micros(instant: DateTime<Utc>) -> i64 {
    let floor = floor_micros(instant);
    if instant.nanosecond() % 1_000 == 0 {
        floor
    } else {
        floor + 1
    }
}

/// The search window shrunk to whole microseconds.
fn window_micros(search_window: &Interval) -> (i64, i64) {
    (
        ceil_micros(search_window.start()),
        floor_micros(search_window.end()),
    )
}

fn interval_from_micros(start: i64, end: i64) -> Option<Interval> {
    Interval::new(
        DateTime::from_timestamp_micros(start)?,
        DateTime::from_timestamp_micros(end)?,
    )
}
