//! WASM bindings for bikram-sambat.
//!
//! Exposes year starts, leap-year checks and instant decomposition to
//! JavaScript via `wasm-bindgen`. Instants cross the boundary as JS numbers
//! (milliseconds since 1970-01-01Z); structured results are JSON strings.
//!
//! Every export takes an optional leap-table JSON (`{"leap_years": [...]}`);
//! without one the provisional quadrennial rule applies.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p bikram-sambat-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/bikram-sambat-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/bikram_sambat_wasm.wasm
//! ```

use std::sync::Arc;

use bikram_sambat::{
    config, CalendarHooks, Chronology, ChronologyRegistry, CivilDate, LeapYearTable,
};
use chrono_tz::Tz;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Largest integer a JS number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CivilDateDto {
    zone: String,
    #[serde(flatten)]
    date: CivilDate,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn registry(leap_table_json: Option<&str>) -> Result<ChronologyRegistry, String> {
    match leap_table_json {
        Some(json) => {
            let table = LeapYearTable::from_json(json).map_err(|e| e.to_string())?;
            Ok(ChronologyRegistry::new(Arc::new(table)))
        }
        None => Ok(ChronologyRegistry::global().clone()),
    }
}

/// Without an environment to read `TZ` from, the default zone is UTC.
fn zone(name: Option<&str>) -> Result<Tz, String> {
    match name {
        Some(name) => config::parse_zone(name).map_err(|e| e.to_string()),
        None => Ok(Tz::UTC),
    }
}

fn instant_from_js(instant: f64) -> Result<i64, String> {
    if !instant.is_finite() || instant.fract() != 0.0 || instant.abs() > MAX_SAFE_INTEGER {
        return Err(format!("Invalid instant '{}': expected an integer number of milliseconds", instant));
    }
    Ok(instant as i64)
}

fn year_start_impl(year: i32, leap_table_json: Option<&str>) -> Result<f64, String> {
    let bs = registry(leap_table_json)?.get_instance_utc();
    let instant = bs
        .date_time_millis(year, 1, 1, 0)
        .map_err(|e| e.to_string())?;
    Ok(instant as f64)
}

fn date_time_millis_impl(
    year: i32,
    month: u32,
    day: u32,
    millis_of_day: f64,
    zone_name: Option<&str>,
    leap_table_json: Option<&str>,
) -> Result<f64, String> {
    let bs = registry(leap_table_json)?.get_instance_in(zone(zone_name)?);
    let millis_of_day = instant_from_js(millis_of_day)?;
    let instant = bs
        .date_time_millis(year, month, day, millis_of_day)
        .map_err(|e| e.to_string())?;
    Ok(instant as f64)
}

fn decompose_impl(
    instant: f64,
    zone_name: Option<&str>,
    leap_table_json: Option<&str>,
) -> Result<String, String> {
    let zone = zone(zone_name)?;
    let bs = registry(leap_table_json)?.get_instance_in(zone);
    let date = bs
        .decompose(instant_from_js(instant)?)
        .map_err(|e| e.to_string())?;
    let dto = CivilDateDto {
        zone: zone.name().to_string(),
        date,
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

fn is_leap_year_impl(year: i32, leap_table_json: Option<&str>) -> Result<bool, String> {
    let internal = chronology_core::skip::to_internal("year", year).map_err(|e| e.to_string())?;
    Ok(registry(leap_table_json)?.engine().is_leap_year(internal))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Instant (ms since 1970-01-01Z) at which `year` begins, in UTC.
///
/// # Arguments
/// - `year` -- Bikram Sambat year, from 1 onwards
/// - `leap_table_json` -- Optional leap table, e.g. `{"leap_years": [2081]}`
#[wasm_bindgen(js_name = "yearStart")]
pub fn year_start(year: i32, leap_table_json: Option<String>) -> Result<f64, JsValue> {
    year_start_impl(year, leap_table_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Instant for a calendar date and time of day in `zone` (UTC if omitted).
#[wasm_bindgen(js_name = "dateTimeMillis")]
pub fn date_time_millis(
    year: i32,
    month: u32,
    day: u32,
    millis_of_day: f64,
    zone: Option<String>,
    leap_table_json: Option<String>,
) -> Result<f64, JsValue> {
    date_time_millis_impl(
        year,
        month,
        day,
        millis_of_day,
        zone.as_deref(),
        leap_table_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Calendar fields of `instant` in `zone` (UTC if omitted).
///
/// Returns a JSON object with `zone`, `era`, `year`, `month`, `day`,
/// `day_of_year`, `weekyear`, `millis_of_day` and `leap_day`.
#[wasm_bindgen(js_name = "decompose")]
pub fn decompose(
    instant: f64,
    zone: Option<String>,
    leap_table_json: Option<String>,
) -> Result<String, JsValue> {
    decompose_impl(instant, zone.as_deref(), leap_table_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Whether `year` is a leap year under the given (or provisional) rule.
#[wasm_bindgen(js_name = "isLeapYear")]
pub fn is_leap_year(year: i32, leap_table_json: Option<String>) -> Result<bool, JsValue> {
    is_leap_year_impl(year, leap_table_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR_1963_START: f64 = 21_859_200_000.0;

    #[test]
    fn year_start_of_reference_year() {
        assert_eq!(year_start_impl(1963, None).unwrap(), YEAR_1963_START);
    }

    #[test]
    fn year_zero_is_rejected() {
        let err = year_start_impl(0, None).unwrap_err();
        assert_eq!(err, "Value 0 for year is not supported");
    }

    #[test]
    fn years_before_year_one_are_rejected() {
        let err = year_start_impl(-5, None).unwrap_err();
        assert!(err.contains("below the supported minimum"), "{err}");
    }

    #[test]
    fn decompose_returns_json_with_zone() {
        let json = decompose_impl(YEAR_1963_START, None, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["zone"], "UTC");
        assert_eq!(value["era"], "BS");
        assert_eq!(value["year"], 1963);
        assert_eq!(value["day_of_year"], 1);
    }

    #[test]
    fn date_time_millis_in_kathmandu() {
        let utc = date_time_millis_impl(2081, 1, 1, 0.0, None, None).unwrap();
        let ktm = date_time_millis_impl(2081, 1, 1, 0.0, Some("Asia/Kathmandu"), None).unwrap();
        assert_eq!(utc - ktm, 20_700_000.0);
    }

    #[test]
    fn fractional_instant_is_rejected() {
        assert!(decompose_impl(1.5, None, None).is_err());
        assert!(decompose_impl(f64::NAN, None, None).is_err());
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = decompose_impl(0.0, Some("Nowhere/Special"), None).unwrap_err();
        assert_eq!(err, "Invalid timezone: Nowhere/Special");
    }

    #[test]
    fn leap_table_overrides_rule() {
        assert!(is_leap_year_impl(1963, None).unwrap());
        assert!(!is_leap_year_impl(1963, Some(r#"{"leap_years": [2081]}"#)).unwrap());
        assert!(is_leap_year_impl(2081, Some(r#"{"leap_years": [2081]}"#)).unwrap());
    }

    #[test]
    fn malformed_leap_table_is_rejected() {
        let err = is_leap_year_impl(2081, Some("[1, 2")).unwrap_err();
        assert!(err.starts_with("Invalid leap-year table"), "{err}");
    }
}
