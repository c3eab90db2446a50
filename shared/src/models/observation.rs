//! Buoy observation model

use serde::{Deserialize, Serialize};

/// One station's decoded reading at one point in time.
///
/// Every numeric field is either a finite value or `None`; upstream
/// sentinels never survive into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// ISO-8601 UTC timestamp, absent unless all five time columns were present
    pub time: Option<String>,
    pub wind_direction_deg: Option<f64>,
    pub sustained_wind_knots: Option<f64>,
    pub gust_knots: Option<f64>,
    pub wave_height_feet: Option<f64>,
    pub dominant_wave_period_seconds: Option<f64>,
    pub mean_wave_direction_deg: Option<f64>,
    pub air_temp_f: Option<f64>,
    pub water_temp_f: Option<f64>,
    pub pressure_hpa: Option<f64>,
}
