//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, calendar listing, the working-hours check, and
//! period classification to JavaScript via `wasm-bindgen`. Schedules and
//! results cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::{SlotOptions, TimeRange, WeekSchedule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse JS inputs
// ---------------------------------------------------------------------------

fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_schedule(json: &str) -> Result<WeekSchedule, JsValue> {
    WeekSchedule::from_json(json).map_err(|e| js_err("Invalid schedule JSON", e))
}

fn parse_timezone(name: &str) -> Result<Tz, JsValue> {
    name.parse::<Tz>()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone: {}", name)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| js_err(&format!("Invalid date '{}'", s), e))
}

fn parse_dates_json(json: &str) -> Result<BTreeSet<NaiveDate>, JsValue> {
    let raw: Vec<String> =
        serde_json::from_str(json).map_err(|e| js_err("Invalid dates JSON", e))?;
    raw.iter().map(|s| parse_date(s)).collect()
}

/// Parse an ISO 8601 datetime into the business wall-clock time.
///
/// RFC 3339 strings with an offset are converted into `tz`. Naive strings
/// (e.g., "2026-03-16T09:00:00") are already wall-clock and pass through.
fn parse_wall_clock(s: &str, tz: Tz) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| js_err(&format!("Invalid datetime '{}'", s), e))
}

/// Parse an ISO 8601 datetime into an absolute instant, reading naive
/// strings in `tz`.
fn parse_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| js_err(&format!("Invalid datetime '{}'", s), e))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| JsValue::from_str(&format!("{} does not exist in {}", s, tz)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err("Serialization error", e))
}

fn options(duration_minutes: u32, extend_to_next_hour: bool) -> SlotOptions {
    SlotOptions {
        duration_minutes,
        extend_to_next_hour,
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate bookable slots for one date.
///
/// Returns a JSON array with one `{range: {start, end}, slots: [...]}` entry
/// per opening block, in block order. Slot times are naive ISO 8601
/// wall-clock strings.
///
/// # Arguments
/// - `schedule_json` -- Week schedule keyed by lowercase day name
/// - `date` -- Calendar date (e.g., "2026-03-16")
/// - `duration_minutes` -- Appointment length; must be > 0
/// - `extend_to_next_hour` -- Apply the round-hour extension
#[wasm_bindgen(js_name = "generateDaySlots")]
pub fn generate_day_slots(
    schedule_json: &str,
    date: &str,
    duration_minutes: u32,
    extend_to_next_hour: bool,
) -> Result<String, JsValue> {
    let week = parse_schedule(schedule_json)?;
    let date = parse_date(date)?;

    let blocks = slot_engine::generate_day_slots(
        week.for_date(date),
        date,
        &options(duration_minutes, extend_to_next_hour),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&blocks)
}

/// List a calendar month for the booking flow.
///
/// `unavailable_json` is a JSON array of "YYYY-MM-DD" dates already fully
/// booked. Returns a JSON array of `{date, day, blocks, selectable}`.
#[wasm_bindgen(js_name = "monthCalendar")]
pub fn month_calendar(
    schedule_json: &str,
    year: i32,
    month: u32,
    duration_minutes: u32,
    extend_to_next_hour: bool,
    unavailable_json: &str,
) -> Result<String, JsValue> {
    let week = parse_schedule(schedule_json)?;
    let unavailable = parse_dates_json(unavailable_json)?;

    let days = slot_engine::month_calendar(
        &week,
        year,
        month,
        &options(duration_minutes, extend_to_next_hour),
        &unavailable,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&days)
}

/// Whether an appointment lies within working hours.
///
/// `start` and `end` are ISO 8601 strings; values with an offset are
/// converted into `timezone` first. A `false` result is a warning for the
/// admin form, not an error.
#[wasm_bindgen(js_name = "isWithinWorkingHours")]
pub fn is_within_working_hours(
    schedule_json: &str,
    start: &str,
    end: &str,
    timezone: &str,
) -> Result<bool, JsValue> {
    let week = parse_schedule(schedule_json)?;
    let tz = parse_timezone(timezone)?;
    let proposed = TimeRange::new(parse_wall_clock(start, tz)?, parse_wall_clock(end, tz)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(slot_engine::is_within_working_hours(&week, &proposed))
}

#[derive(Serialize)]
struct PeriodDto {
    period: slot_engine::Period,
    applicable: BTreeSet<slot_engine::Period>,
}

/// Classify an appointment relative to `now`.
///
/// Returns JSON `{period, applicable}` where `applicable` lists every
/// filter bucket that should show the appointment.
#[wasm_bindgen(js_name = "classifyPeriod")]
pub fn classify_period(appointment: &str, now: &str, timezone: &str) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone)?;
    let appointment = parse_instant(appointment, tz)?;
    let now = parse_instant(now, tz)?;

    to_json(&PeriodDto {
        period: slot_engine::classify_period(&appointment, &now),
        applicable: slot_engine::applicable_periods(&appointment, &now),
    })
}

/// Time-picker choices (`"HH:MM"`) at `precision_minutes` granularity, as
/// a JSON array.
#[wasm_bindgen(js_name = "pickerOptions")]
pub fn picker_options(precision_minutes: u32) -> Result<String, JsValue> {
    let options = slot_engine::TimeOfDay::picker_options(precision_minutes)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let labels: Vec<String> = options.iter().map(|t| t.to_string()).collect();
    to_json(&labels)
}
