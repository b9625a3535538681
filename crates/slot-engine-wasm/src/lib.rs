//! WASM bindings for slot-engine.
//!
//! Exposes common-free window computation and full interview availability to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::interval::{parse_iso8601, to_iso8601_utc};
use slot_engine::slots::DEFAULT_MINIMUM_NOTICE_HOURS;
use slot_engine::timeline::common_free_windows_between;
use slot_engine::{
    AvailabilityQuery, BusySchedule, InterviewTemplate, StaticScheduleProvider, TemplateCatalog,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeWindowDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

/// Optional knobs for [`compute_availability`], all defaulted when absent.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AvailabilityOptions {
    #[serde(default)]
    minimum_notice_hours: Option<i64>,
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    parse_iso8601(s).map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_schedules_json(json: &str) -> Result<Vec<BusySchedule>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedules JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the windows in which nobody in `schedules_json` is busy.
///
/// `schedules_json` is a JSON array of `{interviewerId, name, busy: [{start, end}]}`.
/// Returns a JSON array of `{start, end, durationMinutes}` with UTC `Z` timestamps.
#[wasm_bindgen(js_name = "commonFreeWindows")]
pub fn common_free_windows(
    schedules_json: &str,
    search_start: &str,
    search_end: &str,
) -> Result<String, JsValue> {
    let schedules = parse_schedules_json(schedules_json)?;
    let start = parse_datetime(search_start)?;
    let end = parse_datetime(search_end)?;

    let dtos: Vec<FreeWindowDto> = common_free_windows_between(&schedules, start, end)
        .iter()
        .map(|w| FreeWindowDto {
            start: to_iso8601_utc(w.start()),
            end: to_iso8601_utc(w.end()),
            duration_minutes: w.duration_minutes(),
        })
        .collect();

    to_json(&dtos)
}

/// Compute the full availability payload for one interview template.
///
/// - `template_json` -- `{id, name, duration_minutes, interviewer_ids}`
/// - `schedules_json` -- busy schedules, as for [`common_free_windows`]
/// - `query_json` -- `{start?, end?, start_hour?, end_hour?}`
/// - `now` -- ISO 8601 instant treated as the current time
/// - `options_json` -- optional `{minimumNoticeHours}`
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    template_json: &str,
    schedules_json: &str,
    query_json: &str,
    now: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let template: InterviewTemplate = serde_json::from_str(template_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid template JSON: {}", e)))?;
    let query: AvailabilityQuery = serde_json::from_str(query_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid query JSON: {}", e)))?;
    let options: AvailabilityOptions = match options_json.as_deref() {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?,
        None => AvailabilityOptions::default(),
    };

    let provider = StaticScheduleProvider::new(parse_schedules_json(schedules_json)?);
    let now = parse_datetime(now)?;
    let notice_hours = options
        .minimum_notice_hours
        .unwrap_or(DEFAULT_MINIMUM_NOTICE_HOURS);
    let notice = Duration::try_hours(notice_hours).ok_or_else(|| {
        JsValue::from_str(&format!("Invalid minimumNoticeHours: {} is out of range", notice_hours))
    })?;
    let template_id = template.id;
    let catalog = TemplateCatalog::new([template]);

    let response =
        slot_engine::availability_for_template(&catalog, template_id, &query, &provider, now, notice)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&response)
}
