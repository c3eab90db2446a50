//! HTTP handlers for forecast endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::hourly::DEFAULT_HOURS;
use shared::models::HourlyPoint;
use shared::types::GeoPoint;
use shared::validation::validate_coordinates;

use crate::error::{AppError, AppResult};
use crate::services::ForecastSource;
use crate::AppState;

pub const FORECAST_CACHE_CONTROL: &str = "s-maxage=900, stale-while-revalidate=1800";

/// Query parameters for hourly forecasts
#[derive(Debug, Deserialize)]
pub struct HourlyQuery {
    pub lat: f64,
    pub lon: f64,
    pub hours: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HourlyResponse {
    pub lat: f64,
    pub lon: f64,
    pub hours: Vec<HourlyPoint>,
}

/// Normalized hourly forecast at a point
pub async fn get_hourly_forecast(
    State(state): State<AppState>,
    query: Result<Query<HourlyQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    validate_coordinates(query.lat, query.lon)
        .map_err(|msg| AppError::validation("lat,lon", msg))?;

    let point = GeoPoint::new(query.lat, query.lon);
    let hours = state
        .forecasts
        .fetch_hourly(point, query.hours.unwrap_or(DEFAULT_HOURS))
        .await?;

    Ok((
        [(header::CACHE_CONTROL, FORECAST_CACHE_CONTROL)],
        Json(HourlyResponse {
            lat: query.lat,
            lon: query.lon,
            hours,
        }),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub lat: f64,
    pub lon: f64,
    pub summary: Option<String>,
}

/// Text forecast summary at a point
pub async fn get_forecast_summary(
    State(state): State<AppState>,
    query: Result<Query<PointQuery>, QueryRejection>,
) -> AppResult<Json<SummaryResponse>> {
    let Query(query) = query?;
    validate_coordinates(query.lat, query.lon)
        .map_err(|msg| AppError::validation("lat,lon", msg))?;

    let summary = state
        .forecasts
        .fetch_summary(GeoPoint::new(query.lat, query.lon))
        .await?;

    Ok(Json(SummaryResponse {
        lat: query.lat,
        lon: query.lon,
        summary,
    }))
}
