//! Half-open time intervals and half-hour grid arithmetic.
//!
//! Every instant handled by the engine is a `DateTime<Utc>`. Inputs carrying an
//! explicit offset are normalized to UTC at parse time, so all comparisons and
//! subtractions happen in one reference frame.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Spacing of the grid every slot start snaps to.
pub const ALIGNMENT_MINUTES: i64 = 30;

/// The alignment grid as a `Duration`.
pub fn alignment() -> Duration {
    Duration::minutes(ALIGNMENT_MINUTES)
}

/// A half-open interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, or `None` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes covered by the interval.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Clip this interval to `other`. See [`intersect`].
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        intersect(self, other)
    }

    /// True when the two intervals share at least one instant.
    ///
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Intersection of two half-open intervals.
///
/// Returns `(max(a.start, b.start), min(a.end, b.end))` when that pair is a valid
/// interval, and `None` when the inputs are disjoint or only touch.
pub fn intersect(a: &Interval, b: &Interval) -> Option<Interval> {
    Interval::new(a.start.max(b.start), a.end.min(b.end))
}

/// Round `instant` up to the next multiple of `granularity`, measured from the epoch.
///
/// For 30 minutes this is the next `:00` or `:30` mark. Any residue below the minute
/// first advances to the next whole minute, so an instant exactly on a boundary is
/// returned unchanged while one a millisecond past it moves to the following boundary:
///
/// - `12:00:00.000` → `12:00`
/// - `12:00:00.001` → `12:30`
/// - `12:29:59` → `12:30`
/// - `12:30:00.001` → `13:00`
pub fn ceil_to_alignment(instant: DateTime<Utc>, granularity: Duration) -> DateTime<Utc> {
    let step = granularity.num_seconds();
    if step <= 0 {
        return instant;
    }

    let mut secs = instant.timestamp();
    let sub_minute = secs.rem_euclid(60);
    if sub_minute != 0 || instant.timestamp_subsec_nanos() != 0 {
        secs += 60 - sub_minute;
    }

    let remainder = secs.rem_euclid(step);
    if remainder != 0 {
        secs += step - remainder;
    }

    DateTime::from_timestamp(secs, 0).unwrap_or(instant)
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with a trailing `Z` or an explicit offset, and naive local time
/// (e.g., "2030-01-01T09:00:00"), which is interpreted as UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
            .map(|ndt| ndt.and_utc())
            .map_err(|_| rfc_err),
    }
}

/// Format an instant as UTC ISO 8601 with a trailing `Z`.
pub fn to_iso8601_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
