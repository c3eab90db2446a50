//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Coordinates trimmed to four decimals, the precision the gridded
    /// forecast provider accepts; also used as a cache key.
    pub fn to_query(&self) -> String {
        format!("{:.4},{:.4}", self.lat, self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}°, {:.3}°", self.lat, self.lon)
    }
}
