//! Hazard signal detection
//!
//! Signals look at the watched observations and only the near-term
//! horizon of the forecast window (the first [`NEAR_TERM_HOURS`] points).

use crate::models::{HourlyPoint, Observation, Signals};

pub const NEAR_TERM_HOURS: usize = 6;

/// Gust must reach this absolute floor, knots
pub const GUST_FLOOR_KNOTS: f64 = 20.0;
/// Gust must reach this multiple of the sustained wind
pub const GUST_FACTOR: f64 = 1.35;
/// Gust must exceed sustained wind by at least this spread, knots
pub const GUST_SPREAD_KNOTS: f64 = 5.0;

/// Mean direction band of an offshore (NE/E) flow, degrees inclusive
pub const OFFSHORE_DIRECTION_MIN: f64 = 30.0;
pub const OFFSHORE_DIRECTION_MAX: f64 = 120.0;
pub const OFFSHORE_GUST_KNOTS: f64 = 25.0;

/// Summary phrases indicating fog or otherwise reduced visibility
pub const VISIBILITY_TERMS: [&str; 7] = [
    "fog",
    "patchy fog",
    "dense fog",
    "haze",
    "smoke",
    "mist",
    "low clouds",
];

/// Named offshore wind event mentioned in forecast text
pub const OFFSHORE_EVENT_NAME: &str = "santa ana";

/// The near-term slice of a forecast window
pub fn near_term(hourly: &[HourlyPoint]) -> &[HourlyPoint] {
    &hourly[..hourly.len().min(NEAR_TERM_HOURS)]
}

/// Compute all three signals from one observation set and one window.
pub fn detect_signals(observations: &[Observation], hourly: &[HourlyPoint]) -> Signals {
    let window = near_term(hourly);
    Signals {
        gusty: is_gusty(observations, window),
        reduced_visibility: has_reduced_visibility(window),
        offshore_wind_event: has_offshore_wind_event(window),
    }
}

/// Gust and sustained wind together describe a gusty regime.
pub fn is_gusty_pair(wind: Option<f64>, gust: Option<f64>) -> bool {
    match (wind, gust) {
        (Some(w), Some(g)) if w.is_finite() && g.is_finite() => {
            g >= GUST_FLOOR_KNOTS.max(GUST_FACTOR * w) && (g - w) >= GUST_SPREAD_KNOTS
        }
        _ => false,
    }
}

fn is_gusty(observations: &[Observation], window: &[HourlyPoint]) -> bool {
    observations
        .iter()
        .any(|o| is_gusty_pair(o.sustained_wind_knots, o.gust_knots))
        || window
            .iter()
            .any(|h| is_gusty_pair(h.wind_knots, h.gust_knots))
}

/// Case-insensitive; hyphens read as spaces ("Santa-Ana" matches "santa ana")
fn summary_mentions(point: &HourlyPoint, terms: &[&str]) -> bool {
    point
        .short_forecast_text
        .as_deref()
        .map(|text| text.to_lowercase().replace('-', " "))
        .is_some_and(|text| terms.iter().any(|t| text.contains(t)))
}

fn has_reduced_visibility(window: &[HourlyPoint]) -> bool {
    window.iter().any(|h| summary_mentions(h, &VISIBILITY_TERMS))
}

fn has_offshore_wind_event(window: &[HourlyPoint]) -> bool {
    if window
        .iter()
        .any(|h| summary_mentions(h, &[OFFSHORE_EVENT_NAME]))
    {
        return true;
    }

    let directions: Vec<f64> = window
        .iter()
        .filter_map(|h| h.direction_deg)
        .filter(|d| d.is_finite())
        .collect();
    if directions.is_empty() {
        return false;
    }
    let mean = directions.iter().sum::<f64>() / directions.len() as f64;

    let in_band = (OFFSHORE_DIRECTION_MIN..=OFFSHORE_DIRECTION_MAX).contains(&mean);
    in_band
        && max_defined(window.iter().map(|h| h.gust_knots))
            .is_some_and(|g| g >= OFFSHORE_GUST_KNOTS)
}

/// Maximum over the defined, finite values; `None` when there are none.
pub fn max_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}
