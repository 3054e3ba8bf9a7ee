//! WASM bindings for planner-engine.
//!
//! Exposes occurrence expansion, opening-hours status, and distances to the
//! browser app via `wasm-bindgen`. Structured values cross the boundary as
//! JSON strings; timestamps are naive local `YYYY-MM-DDTHH:MM` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p planner-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/planner_wasm.wasm
//! ```

use chrono::NaiveDateTime;
use planner_engine::local::{format_local, parse_local};
use planner_engine::{EventRecord, OvernightPolicy, WeeklySchedule};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_time(s: &str) -> Result<NaiveDateTime, JsValue> {
    parse_local(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_schedule(json: &str) -> Result<WeeklySchedule, JsValue> {
    WeeklySchedule::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand one stored event into its occurrences starting in `[windowStart, windowEnd)`.
///
/// `event_json` is a stored event object (`startLocal`, `endLocal`,
/// `recurrence`, ...). Returns `{occurrences: [{start, end}], truncated}`.
#[wasm_bindgen(js_name = "generateOccurrences")]
pub fn generate_occurrences(
    event_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    let record: EventRecord = serde_json::from_str(event_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid event JSON: {}", e)))?;
    let definition = record
        .definition()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let ws = parse_time(window_start)?;
    let we = parse_time(window_end)?;

    to_json(&planner_engine::generate_occurrences(&definition, ws, we))
}

/// Open/closed status of a weekly schedule at `now`. Returns `{open, closesAt}`.
#[wasm_bindgen(js_name = "placeStatusNow")]
pub fn place_status_now(
    schedule_json: &str,
    now: &str,
    include_previous_day: bool,
) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let now = parse_time(now)?;
    let policy = if include_previous_day {
        OvernightPolicy::IncludePreviousDay
    } else {
        OvernightPolicy::CurrentDayOnly
    };

    to_json(&planner_engine::status_now_with(&schedule, now, policy))
}

/// Next opening of a schedule within `horizonHours` of `now`, or `undefined`.
#[wasm_bindgen(js_name = "nextOpenWithin")]
pub fn next_open_within(
    schedule_json: &str,
    horizon_hours: f64,
    now: &str,
) -> Result<Option<String>, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let now = parse_time(now)?;
    Ok(planner_engine::next_open_within(&schedule, horizon_hours, now).map(|t| format_local(&t)))
}

/// Great-circle distance in kilometres.
#[wasm_bindgen(js_name = "distanceKm")]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    planner_engine::distance_km(lat1, lon1, lat2, lon2)
}
