//! WebAssembly module for the Sail Risk Platform
//!
//! Provides client-side computation for:
//! - Buoy report decoding
//! - Hourly forecast normalization
//! - Leg risk classification
//! - Compass conversions and input validation
//!
//! Structured values cross the boundary as JSON strings.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::buoy::parse_report_detailed;
use shared::hourly::normalize_periods;
use shared::risk::evaluate;
use shared::units::{compass_text_to_degrees, degrees_to_compass_text};
use shared::validation::{validate_comfort_profile, validate_station_id};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[derive(Debug, Deserialize)]
struct ClassifyInput {
    comfort: ComfortProfile,
    #[serde(default)]
    observations: Vec<Observation>,
    #[serde(default)]
    hourly: Vec<HourlyPoint>,
}

fn parse_report_json(text: &str) -> Result<String, String> {
    let observation = match parse_report_detailed(text) {
        Ok(obs) => Some(obs),
        Err(err) => {
            warn(&format!("Buoy report not decoded: {}", err));
            None
        }
    };
    serde_json::to_string(&observation).map_err(|e| e.to_string())
}

fn normalize_json(periods_json: &str, hours: i32) -> Result<String, String> {
    let periods: Vec<ForecastPeriod> = serde_json::from_str(periods_json)
        .map_err(|e| format!("Invalid periods JSON: {}", e))?;
    serde_json::to_string(&normalize_periods(&periods, i64::from(hours)))
        .map_err(|e| e.to_string())
}

fn classify_json(input_json: &str) -> Result<String, String> {
    let input: ClassifyInput = serde_json::from_str(input_json)
        .map_err(|e| format!("Invalid classification JSON: {}", e))?;
    validate_comfort_profile(&input.comfort).map_err(str::to_string)?;

    let evaluation = evaluate(&input.comfort, &input.observations, &input.hourly);
    serde_json::to_string(&evaluation).map_err(|e| e.to_string())
}

/// Decode a raw buoy report into Observation JSON, or `null` when unreadable
#[wasm_bindgen]
pub fn parse_buoy_report(text: &str) -> Result<String, JsValue> {
    parse_report_json(text).map_err(to_js_error)
}

/// Normalize a JSON array of forecast periods into HourlyPoint JSON
#[wasm_bindgen]
pub fn normalize_forecast_periods(periods_json: &str, hours: i32) -> Result<String, JsValue> {
    normalize_json(periods_json, hours).map_err(to_js_error)
}

/// Classify `{comfort, observations, hourly}` JSON
#[wasm_bindgen]
pub fn classify_leg(input_json: &str) -> Result<String, JsValue> {
    classify_json(input_json).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn degrees_to_compass(degrees: Option<f64>) -> String {
    degrees_to_compass_text(degrees).to_string()
}

#[wasm_bindgen]
pub fn compass_to_degrees(text: &str) -> Option<f64> {
    compass_text_to_degrees(text)
}

#[wasm_bindgen]
pub fn is_valid_station_id(id: &str) -> bool {
    validate_station_id(id).is_ok()
}
