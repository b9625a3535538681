//! # slot-engine
//!
//! Deterministic shared-availability computation for interview panels.
//!
//! Given each interviewer's busy blocks, a search window, working hours, and a slot
//! length, the engine returns every half-hour-aligned slot in which the whole panel
//! is free, at least the minimum notice (24 hours by default) after "now".
//!
//! ## Modules
//!
//! - [`interval`] — Half-open intervals, intersection, half-hour ceiling, ISO 8601 I/O
//! - [`timeline`] — Sweep busy schedules into common-free windows
//! - [`slots`] — Expand free windows into fixed-length slots within working hours
//! - [`engine`] — Defaults, validation, provider fetch, and orchestration
//! - [`schedule`] — Busy-schedule wire types and the `ScheduleProvider` trait
//! - [`query`] — Raw query parameter validation
//! - [`catalog`] — Interview templates
//! - [`report`] — Response payload and human-readable mirror
//! - [`error`] — Error types

pub mod catalog;
pub mod engine;
pub mod error;
pub mod interval;
pub mod query;
pub mod report;
pub mod schedule;
pub mod slots;
pub mod timeline;

pub use catalog::{InterviewTemplate, TemplateCatalog};
pub use engine::{
    availability_for_template, compute_availability, AvailabilityRequest, AvailabilityResult,
    Subject,
};
pub use error::{ProviderError, SlotError};
pub use interval::{ceil_to_alignment, intersect, Interval};
pub use query::{AvailabilityQuery, ValidatedQuery};
pub use report::AvailabilityResponse;
pub use schedule::{BusyBlock, BusySchedule, ScheduleProvider, StaticScheduleProvider};
pub use slots::{expand_slots, is_within_workday, Constraints, WorkHours};
pub use timeline::compute_common_free_windows;
