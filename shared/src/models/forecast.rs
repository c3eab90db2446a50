//! Hourly forecast models

use serde::{Deserialize, Deserializer, Serialize};

/// One raw period from the gridded hourly forecast provider.
///
/// Text fields the provider sometimes sends as objects or `null` are
/// read leniently: anything that is not a string becomes `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wind_speed: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wind_gust: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wind_direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_forecast: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub detailed_forecast: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// One normalized forecast period for one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub time: Option<String>,
    /// Upper bound of the forecast wind range, in knots
    pub wind_knots: Option<f64>,
    pub gust_knots: Option<f64>,
    pub direction_deg: Option<f64>,
    #[serde(default)]
    pub direction_text: Option<String>,
    pub short_forecast_text: Option<String>,
}
