//! Hourly forecast normalization
//!
//! Turns the provider's textual periods ("10 to 20 mph", "NE") into
//! comparable numeric [`HourlyPoint`]s in knots and degrees.

use crate::models::{ForecastPeriod, HourlyPoint};
use crate::units::{compass_text_to_degrees, miles_per_hour_to_knots, round_to};

pub const DEFAULT_HOURS: i64 = 12;
pub const MAX_HOURS: usize = 48;

/// Number of periods to return for a requested count: at least 1, at most 48.
pub fn clamp_hours(requested: i64) -> usize {
    requested.clamp(1, MAX_HOURS as i64) as usize
}

/// Extract a speed in mph from text like "15 mph" or "10 to 20 mph".
///
/// A range yields its upper bound. Text without a number followed by
/// `mph` yields `None`.
pub fn mph_from_text(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i].is_ascii_digit())
        .find_map(|i| match_speed_at(bytes, i))
}

/// Try `\d+(\s*to\s*\d+)?\s*mph` anchored at `start`.
fn match_speed_at(bytes: &[u8], start: usize) -> Option<f64> {
    let (low, after_low) = digits_at(bytes, start)?;

    // Range form first, then fall back to the single-value form
    let ranged = keyword_at(bytes, skip_spaces(bytes, after_low), b"to")
        .and_then(|pos| digits_at(bytes, skip_spaces(bytes, pos)))
        .and_then(|(high, after_high)| {
            keyword_at(bytes, skip_spaces(bytes, after_high), b"mph").map(|_| high)
        });
    if let Some(high) = ranged {
        return Some(low.max(high));
    }

    keyword_at(bytes, skip_spaces(bytes, after_low), b"mph").map(|_| low)
}

fn digits_at(bytes: &[u8], start: usize) -> Option<(f64, usize)> {
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |n| start + n);
    if end == start {
        return None;
    }
    let value = std::str::from_utf8(&bytes[start..end]).ok()?.parse::<f64>().ok()?;
    Some((value, end))
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn keyword_at(bytes: &[u8], pos: usize, keyword: &[u8]) -> Option<usize> {
    let end = pos + keyword.len();
    (end <= bytes.len() && bytes[pos..end].eq_ignore_ascii_case(keyword)).then_some(end)
}

/// mph text → knots, rounded to one decimal
fn knots_from_text(text: Option<&str>) -> Option<f64> {
    miles_per_hour_to_knots(text.and_then(mph_from_text)).map(|kt| round_to(kt, 1))
}

/// Normalize one provider period.
pub fn normalize_period(period: &ForecastPeriod) -> HourlyPoint {
    let direction_text = period
        .wind_direction
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    HourlyPoint {
        time: period.start_time.clone(),
        wind_knots: knots_from_text(period.wind_speed.as_deref()),
        gust_knots: knots_from_text(period.wind_gust.as_deref()),
        direction_deg: direction_text
            .as_deref()
            .and_then(compass_text_to_degrees)
            .map(|d| round_to(d, 1)),
        direction_text,
        short_forecast_text: period.short_forecast.clone(),
    }
}

/// Normalize the first `clamp_hours(hours)` periods, in provider order.
pub fn normalize_periods(periods: &[ForecastPeriod], hours: i64) -> Vec<HourlyPoint> {
    periods
        .iter()
        .take(clamp_hours(hours))
        .map(normalize_period)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(speed: &str, gust: Option<&str>, dir: &str) -> ForecastPeriod {
        ForecastPeriod {
            start_time: Some("2024-06-01T12:00:00-07:00".to_string()),
            wind_speed: Some(speed.to_string()),
            wind_gust: gust.map(str::to_string),
            wind_direction: Some(dir.to_string()),
            short_forecast: Some("Sunny".to_string()),
            detailed_forecast: None,
        }
    }

    #[test]
    fn test_mph_single_value() {
        assert_eq!(mph_from_text("15 mph"), Some(15.0));
        assert_eq!(mph_from_text("5MPH"), Some(5.0));
    }

    #[test]
    fn test_mph_range_takes_upper_bound() {
        assert_eq!(mph_from_text("10 to 20 mph"), Some(20.0));
        assert_eq!(mph_from_text("10to20mph"), Some(20.0));
    }

    #[test]
    fn test_mph_no_match() {
        assert_eq!(mph_from_text(""), None);
        assert_eq!(mph_from_text("calm"), None);
        assert_eq!(mph_from_text("15 knots"), None);
    }

    #[test]
    fn test_mph_skips_unrelated_numbers() {
        assert_eq!(mph_from_text("gusts 3 knots, then 12 mph"), Some(12.0));
        assert_eq!(mph_from_text("10 to 20 kt, 8 mph"), Some(8.0));
    }

    #[test]
    fn test_normalize_period() {
        let point = normalize_period(&period("10 to 20 mph", Some("25 mph"), "ne"));
        assert_eq!(point.wind_knots, Some(17.4));
        assert_eq!(point.gust_knots, Some(21.7));
        assert_eq!(point.direction_deg, Some(45.0));
        assert_eq!(point.direction_text.as_deref(), Some("ne"));
        assert_eq!(point.short_forecast_text.as_deref(), Some("Sunny"));
    }

    #[test]
    fn test_normalize_period_missing_values() {
        let point = normalize_period(&ForecastPeriod::default());
        assert_eq!(point, HourlyPoint::default());

        let point = normalize_period(&period("calm", None, "variable"));
        assert_eq!(point.wind_knots, None);
        assert_eq!(point.gust_knots, None);
        assert_eq!(point.direction_deg, None);
    }

    #[test]
    fn test_clamp_hours() {
        assert_eq!(clamp_hours(0), 1);
        assert_eq!(clamp_hours(-5), 1);
        assert_eq!(clamp_hours(12), 12);
        assert_eq!(clamp_hours(100), 48);
    }

    #[test]
    fn test_normalize_periods_limits_count() {
        let periods: Vec<ForecastPeriod> = (0..60).map(|_| period("5 mph", None, "W")).collect();
        assert_eq!(normalize_periods(&periods, 0).len(), 1);
        assert_eq!(normalize_periods(&periods, 100).len(), 48);
        assert_eq!(normalize_periods(&periods[..3], 12).len(), 3);
    }
}
