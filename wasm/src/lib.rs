//! WebAssembly module for the Boujdour weather dashboard
//!
//! Provides client-side computation for:
//! - Unit conversions and categorical labels (UV, wind, air quality)
//! - Weather alerts
//! - Moon phase and tide estimates
//! - Localized dashboard rendering
//!
//! Structured results cross the boundary as JSON strings.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use shared::alerts::evaluate_alert;
use shared::convert::{self, UvLevel};
use shared::format::{AlertView, DashboardView};
use shared::i18n;
use shared::models::{CompositeResponse, WeatherSnapshot};
use shared::simulate;
use shared::types::{Language, TextDirection};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"boujdour weather module loaded".into());
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_language(code: &str) -> Result<Language, String> {
    code.parse().map_err(|e: shared::types::LanguageError| e.to_string())
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("Invalid date {}: {}", date, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Today's date in the browser's local time
fn browser_today() -> Result<NaiveDate, String> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .ok_or_else(|| "Invalid browser date".to_string())
}

fn alert_view(current_json: &str, lang: &str) -> Result<Option<AlertView>, String> {
    let lang = parse_language(lang)?;
    let current: WeatherSnapshot = serde_json::from_str(current_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;

    Ok(evaluate_alert(&current).map(|alert| AlertView {
        level: alert.level,
        title: i18n::alert_title(alert.kind, lang).to_string(),
        message: i18n::alert_message(&alert, lang),
    }))
}

fn dashboard(composite_json: &str, lang: &str, today: NaiveDate) -> Result<DashboardView, String> {
    let lang = parse_language(lang)?;
    let data: CompositeResponse = serde_json::from_str(composite_json)
        .map_err(|e| format!("Invalid dashboard JSON: {}", e))?;
    Ok(DashboardView::build(&data, lang, today))
}

// ============================================================================
// Converters
// ============================================================================

/// UV category key (low, moderate, high, veryHigh, extreme)
#[wasm_bindgen]
pub fn uv_level(uv_index: f64) -> String {
    UvLevel::from_index(uv_index).key().to_string()
}

/// Localized UV category
#[wasm_bindgen]
pub fn uv_level_label(uv_index: f64, lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    Ok(i18n::uv_level_label(UvLevel::from_index(uv_index), lang).to_string())
}

/// Localized 16-point compass direction for a bearing in degrees
#[wasm_bindgen]
pub fn wind_direction(degrees: f64, lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    Ok(i18n::compass_label(convert::wind_direction(degrees), lang))
}

/// Air quality estimate as `{index, level}` JSON
#[wasm_bindgen]
pub fn estimate_air_quality(wind_speed_kmh: f64, humidity: i32, description: &str) -> Result<String, JsValue> {
    let aqi = convert::estimate_air_quality(wind_speed_kmh, humidity, description);
    to_json(&aqi).map_err(js_err)
}

/// Convert m/s to km/h
#[wasm_bindgen]
pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    convert::ms_to_kmh(speed_ms)
}

/// Convert meters to kilometers
#[wasm_bindgen]
pub fn meters_to_km(meters: f64) -> f64 {
    convert::meters_to_km(meters)
}

/// Localized severity of a condition description
#[wasm_bindgen]
pub fn condition_severity(description: &str, lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    Ok(i18n::severity_label(convert::severity(description), lang).to_string())
}

/// Localized comparison of apparent to measured temperature
#[wasm_bindgen]
pub fn feels_like(temperature: f64, feels_like: f64, lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    let comparison = convert::feels_like_comparison(temperature, feels_like);
    Ok(i18n::feels_like_label(comparison, lang).to_string())
}

/// Glyph for a provider icon code
#[wasm_bindgen]
pub fn icon_glyph(code: &str) -> String {
    convert::icon_glyph(code).to_string()
}

/// Layout direction for a language: "ltr" or "rtl"
#[wasm_bindgen]
pub fn text_direction(lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    Ok(match lang.direction() {
        TextDirection::Ltr => "ltr",
        TextDirection::Rtl => "rtl",
    }
    .to_string())
}

// ============================================================================
// Alerts
// ============================================================================

/// Highest-priority alert for a weather snapshot, as JSON (`null` when none)
#[wasm_bindgen]
pub fn weather_alert(current_json: &str, lang: &str) -> Result<String, JsValue> {
    let alert = alert_view(current_json, lang).map_err(js_err)?;
    to_json(&alert).map_err(js_err)
}

// ============================================================================
// Simulators
// ============================================================================

/// Localized moon phase with its emoji for a `YYYY-MM-DD` date
#[wasm_bindgen]
pub fn moon_phase(date: &str, lang: &str) -> Result<String, JsValue> {
    let lang = parse_language(lang).map_err(js_err)?;
    let phase = simulate::moon_phase(parse_date(date).map_err(js_err)?);
    Ok(format!("{} {}", phase.emoji(), i18n::moon_phase_label(phase, lang)))
}

/// Tide times for a `YYYY-MM-DD` date as `{highTide, lowTide}` JSON
#[wasm_bindgen]
pub fn tide_times(date: &str) -> Result<String, JsValue> {
    let tides = simulate::tide_times(parse_date(date).map_err(js_err)?);
    to_json(&tides).map_err(js_err)
}

// ============================================================================
// Dashboard
// ============================================================================

/// Localized display values for a composite response, as JSON
#[wasm_bindgen]
pub fn dashboard_view(composite_json: &str, lang: &str, today: &str) -> Result<String, JsValue> {
    let today = parse_date(today).map_err(js_err)?;
    let view = dashboard(composite_json, lang, today).map_err(js_err)?;
    to_json(&view).map_err(js_err)
}

/// [`dashboard_view`] using the browser's current date
#[wasm_bindgen]
pub fn dashboard_view_now(composite_json: &str, lang: &str) -> Result<String, JsValue> {
    let today = browser_today().map_err(js_err)?;
    let view = dashboard(composite_json, lang, today).map_err(js_err)?;
    to_json(&view).map_err(js_err)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_language_is_js_error() {
        assert!(uv_level_label(5.0, "de").is_err());
    }
}
