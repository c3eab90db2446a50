//! Per-leg risk classification
//!
//! Classification is an ordered pipeline of pure steps:
//!
//! 1. baseline status from waves, peak wind and peak gust against the
//!    leg's comfort profile
//! 2. escalate one level when the window is gusty
//! 3. force red on an offshore wind event
//!
//! Missing data never trips a threshold: a leg with no usable samples
//! classifies as green.

use serde::Serialize;

use crate::models::{
    Advisory, AdvisoryKind, ComfortProfile, HourlyPoint, Observation, Signals, Status,
    StatusResult,
};
use crate::signals::{detect_signals, max_defined, near_term};
use crate::units::format_rounded;

/// Seas with a dominant period under this many seconds feel rougher
pub const SHORT_PERIOD_SECONDS: f64 = 7.0;
/// Penalty added to short-period wave heights, feet
pub const SHORT_PERIOD_PENALTY_FEET: f64 = 1.0;
/// Allowance added to the profile's wave threshold, feet
pub const WAVE_ALLOWANCE_FEET: f64 = 1.0;
/// Multiple of the effective wave threshold that is red on its own
pub const RED_WAVE_MULTIPLIER: f64 = 1.5;

const LOW_RATIONALE: &str = "Favorable conditions with manageable winds and seas.";
const ELEVATED_RATIONALE: &str =
    "Moderate conditions expected. Monitor winds/sea state and adjust timing.";
const HIGH_RATIONALE: &str = "Plan exceeds comfort limits. Consider alternate timing or route.";

/// Figures the classification was based on
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowPeaks {
    /// Largest observed wave height, feet
    pub max_wave_feet: Option<f64>,
    /// Largest wave height after the short-period penalty, feet
    pub max_effective_wave_feet: Option<f64>,
    pub peak_wind_knots: Option<f64>,
    pub peak_gust_knots: Option<f64>,
}

impl WindowPeaks {
    pub fn compute(observations: &[Observation], hourly: &[HourlyPoint]) -> Self {
        let window = near_term(hourly);
        Self {
            max_wave_feet: max_defined(observations.iter().map(|o| o.wave_height_feet)),
            max_effective_wave_feet: max_defined(observations.iter().map(effective_wave_feet)),
            peak_wind_knots: max_defined(window.iter().map(|h| h.wind_knots)),
            peak_gust_knots: max_defined(window.iter().map(|h| h.gust_knots)),
        }
    }
}

/// Wave height plus the short-period penalty, when a height is known
pub fn effective_wave_feet(obs: &Observation) -> Option<f64> {
    let height = obs.wave_height_feet?;
    let short_period = obs
        .dominant_wave_period_seconds
        .is_some_and(|p| p < SHORT_PERIOD_SECONDS);
    Some(if short_period {
        height + SHORT_PERIOD_PENALTY_FEET
    } else {
        height
    })
}

fn exceeds(value: Option<f64>, limit: f64) -> bool {
    value.is_some_and(|v| v > limit)
}

fn reaches(value: Option<f64>, limit: f64) -> bool {
    value.is_some_and(|v| v >= limit)
}

/// Status from thresholds alone, before signals are applied
pub fn baseline_status(comfort: &ComfortProfile, peaks: &WindowPeaks) -> Status {
    let comfort_wave = comfort.wave_feet + WAVE_ALLOWANCE_FEET;
    let wave = peaks.max_effective_wave_feet;

    if reaches(wave, RED_WAVE_MULTIPLIER * comfort_wave)
        || exceeds(peaks.peak_gust_knots, comfort.gust_knots)
    {
        Status::Red
    } else if exceeds(wave, comfort_wave) || exceeds(peaks.peak_wind_knots, comfort.wind_knots) {
        Status::Yellow
    } else {
        Status::Green
    }
}

pub fn apply_gusty(status: Status, signals: &Signals) -> Status {
    if signals.gusty {
        status.escalate()
    } else {
        status
    }
}

pub fn apply_offshore_override(status: Status, signals: &Signals) -> Status {
    if signals.offshore_wind_event {
        Status::Red
    } else {
        status
    }
}

/// Fixed sentence per level, with peak gust and observed seas appended when known
pub fn rationale(status: Status, peaks: &WindowPeaks) -> String {
    let sentence = match status {
        Status::Green => LOW_RATIONALE,
        Status::Yellow => ELEVATED_RATIONALE,
        Status::Red => HIGH_RATIONALE,
    };

    let mut parts = Vec::new();
    if let Some(gust) = peaks.peak_gust_knots {
        parts.push(format!("gusts ~{}kt", format_rounded(gust, 0)));
    }
    if let Some(wave) = peaks.max_wave_feet {
        parts.push(format!("seas ~{}ft", format_rounded(wave, 1)));
    }

    if parts.is_empty() {
        sentence.to_string()
    } else {
        format!("{} ({})", sentence, parts.join(", "))
    }
}

/// Classify one leg.
pub fn classify(
    comfort: &ComfortProfile,
    observations: &[Observation],
    hourly: &[HourlyPoint],
    signals: &Signals,
) -> StatusResult {
    let peaks = WindowPeaks::compute(observations, hourly);

    let status = baseline_status(comfort, &peaks);
    let status = apply_gusty(status, signals);
    let status = apply_offshore_override(status, signals);

    StatusResult {
        status,
        risk: status.risk_level(),
        rationale: rationale(status, &peaks),
    }
}

/// Heads-up lines for a leg, most severe first
pub fn build_advisories(hourly: &[HourlyPoint], signals: &Signals) -> Vec<Advisory> {
    let window = near_term(hourly);
    let mut advisories = Vec::new();
    if window.is_empty() {
        return advisories;
    }

    if signals.offshore_wind_event {
        advisories.push(Advisory {
            kind: AdvisoryKind::Warning,
            title: "Possible offshore (NE/E) gusts next hours".to_string(),
            subtitle: Some("Watch gaps/channel alignments".to_string()),
        });
    }
    if signals.reduced_visibility {
        advisories.push(Advisory {
            kind: AdvisoryKind::Warning,
            title: "Reduced visibility possible".to_string(),
            subtitle: Some("Fog, haze or low clouds in the forecast".to_string()),
        });
    }
    if signals.gusty {
        advisories.push(Advisory {
            kind: AdvisoryKind::Statement,
            title: "Gusty conditions: gust spread well above sustained wind".to_string(),
            subtitle: None,
        });
    }
    if let Some(summary) = window[0]
        .short_forecast_text
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        advisories.push(Advisory {
            kind: AdvisoryKind::Info,
            title: summary.to_string(),
            subtitle: Some("NWS hourly".to_string()),
        });
    }

    advisories
}

/// Full evaluation of one window against one comfort profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    #[serde(flatten)]
    pub result: StatusResult,
    pub signals: Signals,
    pub advisories: Vec<Advisory>,
}

/// Signals, classification and advisories for one observation set and window
pub fn evaluate(
    comfort: &ComfortProfile,
    observations: &[Observation],
    hourly: &[HourlyPoint],
) -> Evaluation {
    let signals = detect_signals(observations, hourly);
    Evaluation {
        result: classify(comfort, observations, hourly, &signals),
        advisories: build_advisories(hourly, &signals),
        signals,
    }
}
