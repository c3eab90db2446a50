//! Numeric parsing and unit conversions for marine telemetry
//!
//! Every raw token coming from an upstream report goes through
//! [`parse_numeric`]; nothing else in the crate interprets a token itself.

/// Missing-value sentinel used by the buoy provider.
pub const MISSING_SENTINEL: &str = "MM";

pub const MPS_TO_KNOTS: f64 = 1.94384;
pub const METERS_TO_FEET: f64 = 3.28084;
pub const MPH_TO_KNOTS: f64 = 0.868976;

/// Placeholder rendered when a direction cannot be expressed as compass text.
pub const NO_DIRECTION: &str = "—";

/// The 16 compass points, clockwise from north in 22.5° steps.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEGREES: f64 = 22.5;

/// Parse a raw token into a finite number.
///
/// Empty tokens, the `MM` sentinel, the literal `NaN` and anything that
/// does not parse as a finite real all collapse to `None`.
pub fn parse_numeric(token: Option<&str>) -> Option<f64> {
    let token = token?.trim();
    if token.is_empty() || token == MISSING_SENTINEL || token == "NaN" {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn meters_per_second_to_knots(v: Option<f64>) -> Option<f64> {
    v.map(|v| v * MPS_TO_KNOTS)
}

pub fn meters_to_feet(v: Option<f64>) -> Option<f64> {
    v.map(|v| v * METERS_TO_FEET)
}

pub fn celsius_to_fahrenheit(v: Option<f64>) -> Option<f64> {
    v.map(|v| v * 9.0 / 5.0 + 32.0)
}

pub fn miles_per_hour_to_knots(v: Option<f64>) -> Option<f64> {
    v.map(|v| v * MPH_TO_KNOTS)
}

/// Map a 16-point compass abbreviation (case-insensitive) to degrees.
pub fn compass_text_to_degrees(text: &str) -> Option<f64> {
    let wanted = text.trim().to_ascii_uppercase();
    COMPASS_POINTS
        .iter()
        .position(|p| *p == wanted)
        .map(|i| i as f64 * SECTOR_DEGREES)
}

/// Render degrees as the nearest of the 16 compass points.
///
/// Absent or non-finite input yields [`NO_DIRECTION`].
pub fn degrees_to_compass_text(deg: Option<f64>) -> &'static str {
    match deg.filter(|d| d.is_finite()) {
        Some(d) => {
            let sector = (d / SECTOR_DEGREES).round().rem_euclid(16.0) as usize;
            COMPASS_POINTS[sector]
        }
        None => NO_DIRECTION,
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round() / factor
}

/// Format a figure the way a number prints after rounding: `4.0` becomes `4`.
pub fn format_rounded(v: f64, decimals: i32) -> String {
    let rounded = round_to(v, decimals);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
