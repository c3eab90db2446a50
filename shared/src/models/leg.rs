//! Route leg configuration

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Per-leg comfort thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComfortProfile {
    /// Maximum comfortable sustained wind, knots
    pub wind_knots: f64,
    /// Maximum comfortable gust, knots
    pub gust_knots: f64,
    /// Maximum comfortable wave height, feet
    pub wave_feet: f64,
}

impl ComfortProfile {
    pub fn new(wind_knots: f64, gust_knots: f64, wave_feet: f64) -> Self {
        Self {
            wind_knots,
            gust_knots,
            wave_feet,
        }
    }

    /// Short human label, e.g. "up to 22 kt / 6 ft"
    pub fn label(&self) -> String {
        format!(
            "up to {} kt / {} ft",
            crate::units::format_rounded(self.wind_knots, 1),
            crate::units::format_rounded(self.wave_feet, 1)
        )
    }
}

/// A named point on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// One segment of a planned route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegConfig {
    pub id: String,
    pub from: Waypoint,
    pub to: Waypoint,
    /// Forecast point for the leg; hourly data is fetched here
    pub midpoint: Waypoint,
    #[serde(default)]
    pub distance: String,
    /// Planned departure window label
    #[serde(default)]
    pub window: String,
    pub comfort: ComfortProfile,
    /// Watched buoy station ids
    pub buoys: Vec<String>,
}

impl LegConfig {
    pub fn title(&self) -> String {
        format!("Leg {}: {} → {}", self.id, self.from.name, self.to.name)
    }

    /// Comfort thresholds as shown to the crew
    pub fn comfort_copy(&self) -> String {
        self.comfort.label()
    }

    /// Straight-line center between the endpoints
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.from.lat + self.to.lat) / 2.0,
            (self.from.lon + self.to.lon) / 2.0,
        )
    }
}

/// Built-in three-leg plan: San Diego → Oceanside → Two Harbors → Marina del Rey
pub fn default_legs() -> Vec<LegConfig> {
    vec![
        LegConfig {
            id: "1".to_string(),
            from: Waypoint::new("San Diego", 32.7157, -117.1611),
            to: Waypoint::new("Oceanside", 33.1958, -117.3831),
            midpoint: Waypoint::new("Del Mar", 32.9595, -117.2661),
            distance: "35 nm est".to_string(),
            window: "06:00–12:00".to_string(),
            comfort: ComfortProfile::new(22.0, 30.0, 6.0),
            buoys: vec!["46232".to_string(), "46086".to_string()],
        },
        LegConfig {
            id: "2".to_string(),
            from: Waypoint::new("Oceanside", 33.1958, -117.3831),
            to: Waypoint::new("Two Harbors", 33.4447, -118.4895),
            midpoint: Waypoint::new("Mid-Channel", 33.3203, -117.9363),
            distance: "42 nm est".to_string(),
            window: "08:00–14:00".to_string(),
            comfort: ComfortProfile::new(25.0, 32.0, 8.0),
            buoys: vec![
                "46086".to_string(),
                "46025".to_string(),
                "46221".to_string(),
            ],
        },
        LegConfig {
            id: "3".to_string(),
            from: Waypoint::new("Two Harbors", 33.4447, -118.4895),
            to: Waypoint::new("Marina del Rey", 33.9806, -118.4494),
            midpoint: Waypoint::new("Redondo Canyon", 33.7127, -118.4695),
            distance: "28 nm est".to_string(),
            window: "10:00–16:00".to_string(),
            comfort: ComfortProfile::new(30.0, 38.0, 10.0),
            buoys: vec![
                "46025".to_string(),
                "46222".to_string(),
                "46253".to_string(),
            ],
        },
    ]
}
