//! Validation utilities for route plans and request parameters

use std::collections::HashSet;

use crate::models::{ComfortProfile, LegConfig};
use crate::types::GeoPoint;

// ============================================================================
// Request Parameter Validations
// ============================================================================

/// Maximum length of a buoy station id
pub const MAX_STATION_ID_LEN: usize = 10;

/// Validate buoy station id format (1-10 ASCII alphanumeric)
pub fn validate_station_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("Station id cannot be empty");
    }
    if id.len() > MAX_STATION_ID_LEN {
        return Err("Station id must be at most 10 characters");
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Station id must be alphanumeric only");
    }
    Ok(())
}

/// Split a comma-separated id list, trimming entries and dropping empties.
/// Order and duplicates are kept.
pub fn parse_station_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a latitude/longitude pair
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), &'static str> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

pub fn validate_point(point: &GeoPoint) -> Result<(), &'static str> {
    validate_coordinates(point.lat, point.lon)
}

// ============================================================================
// Route Plan Validations
// ============================================================================

/// Validate comfort thresholds are positive and finite
pub fn validate_comfort_profile(profile: &ComfortProfile) -> Result<(), &'static str> {
    let values = [profile.wind_knots, profile.gust_knots, profile.wave_feet];
    if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Err("Comfort thresholds must be positive numbers");
    }
    Ok(())
}

/// Validate a single leg
pub fn validate_leg(leg: &LegConfig) -> Result<(), &'static str> {
    if leg.id.trim().is_empty() {
        return Err("Leg id cannot be empty");
    }
    validate_point(&leg.from.point())?;
    validate_point(&leg.to.point())?;
    validate_point(&leg.midpoint.point())?;
    validate_comfort_profile(&leg.comfort)?;
    for id in &leg.buoys {
        validate_station_id(id)?;
    }
    Ok(())
}

/// Validate a whole plan: at least one leg, unique ids, every leg well-formed.
pub fn validate_legs(legs: &[LegConfig]) -> Result<(), String> {
    if legs.is_empty() {
        return Err("At least one leg must be configured".to_string());
    }

    let mut seen = HashSet::new();
    for leg in legs {
        if !seen.insert(leg.id.as_str()) {
            return Err(format!("Duplicate leg id '{}'", leg.id));
        }
        validate_leg(leg).map_err(|e| format!("Leg '{}': {}", leg.id, e))?;
    }
    Ok(())
}
