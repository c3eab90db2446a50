//! Buoy realtime report parser
//!
//! Decodes the provider's fixed-token text report:
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
//! #yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
//! 2024 06 01 12 00 270 10.3 13.1   1.5     9   6.2 280 1015.2  20.0  19.0  14.1   MM   MM    MM
//! ```
//!
//! Only the first data row is read: it is the most recent observation.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Observation;
use crate::units::{
    celsius_to_fahrenheit, meters_per_second_to_knots, meters_to_feet, parse_numeric,
    MISSING_SENTINEL,
};

/// Time columns, in the order they must open the header line
pub const TIME_COLUMNS: [&str; 5] = ["YY", "MM", "DD", "hh", "mm"];

/// Why a report could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no time-column header found in report")]
    NoHeader,

    #[error("report has a header but no data line")]
    NoDataLine,

    #[error("data line has {found} tokens, header has {expected}")]
    ShortDataLine { expected: usize, found: usize },
}

/// Parse a report, collapsing every failure to "no data".
pub fn parse_report(text: &str) -> Option<Observation> {
    parse_report_detailed(text).ok()
}

/// Parse a report, keeping the reason for a failure.
pub fn parse_report_detailed(text: &str) -> Result<Observation, ReportError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let header_idx = lines
        .iter()
        .position(|l| is_header_line(l))
        .ok_or(ReportError::NoHeader)?;

    let mut data_idx = header_idx + 1;
    if lines.get(data_idx).is_some_and(|l| is_units_line(l)) {
        data_idx += 1;
    }
    let data_line = lines.get(data_idx).ok_or(ReportError::NoDataLine)?;

    let header: Vec<&str> = strip_comment(lines[header_idx]).split_whitespace().collect();
    let data: Vec<&str> = data_line.split_whitespace().collect();
    if data.len() < header.len() {
        return Err(ReportError::ShortDataLine {
            expected: header.len(),
            found: data.len(),
        });
    }

    let mut row: HashMap<&str, &str> = HashMap::with_capacity(header.len());
    for (name, value) in header.iter().zip(data.iter()) {
        row.entry(*name).or_insert(*value);
    }
    let col = |name: &str| row.get(name).copied();

    Ok(Observation {
        time: build_timestamp(&row),
        wind_direction_deg: parse_numeric(col("WDIR")),
        sustained_wind_knots: meters_per_second_to_knots(parse_numeric(col("WSPD"))),
        gust_knots: meters_per_second_to_knots(parse_numeric(col("GST"))),
        wave_height_feet: meters_to_feet(parse_numeric(col("WVHT"))),
        dominant_wave_period_seconds: parse_numeric(col("DPD")),
        mean_wave_direction_deg: parse_numeric(col("MWD")),
        air_temp_f: celsius_to_fahrenheit(parse_numeric(col("ATMP"))),
        water_temp_f: celsius_to_fahrenheit(parse_numeric(col("WTMP"))),
        pressure_hpa: parse_numeric(col("PRES")),
    })
}

fn strip_comment(line: &str) -> &str {
    line.trim_start_matches('#').trim_start()
}

fn is_header_line(line: &str) -> bool {
    let mut tokens = strip_comment(line).split_whitespace();
    TIME_COLUMNS
        .iter()
        .all(|expected| tokens.next() == Some(*expected))
}

/// A units row is textual: at least one token carries letters and is not
/// a missing-value sentinel. A row made only of `MM`/`NaN` sentinels counts as data.
fn is_units_line(line: &str) -> bool {
    strip_comment(line).split_whitespace().any(|token| {
        token != MISSING_SENTINEL
            && token != "NaN"
            && token.chars().any(|c| c.is_ascii_alphabetic())
    })
}

/// All five time columns or nothing; a partial timestamp is never built.
fn build_timestamp(row: &HashMap<&str, &str>) -> Option<String> {
    let mut parts = Vec::with_capacity(TIME_COLUMNS.len());
    for name in TIME_COLUMNS {
        let value = row.get(name).copied().filter(|v| is_time_token(v))?;
        parts.push(value);
    }
    Some(format!(
        "{}-{}-{}T{}:{}:00Z",
        parts[0], parts[1], parts[2], parts[3], parts[4]
    ))
}

fn is_time_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
