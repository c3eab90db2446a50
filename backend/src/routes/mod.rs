//! Route definitions for the Sail Risk service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::ping))
        // Buoy observations
        .route("/buoy/:id", get(handlers::get_buoy))
        .route("/buoys", get(handlers::get_buoys))
        // Forecasts
        .route("/forecast-hourly", get(handlers::get_hourly_forecast))
        .route("/forecast", get(handlers::get_forecast_summary))
        // Route legs
        .nest("/legs", leg_routes())
        // Stateless classification
        .route("/risk/classify", post(handlers::classify_risk))
}

/// Route leg routes
fn leg_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_legs))
        .route("/risk", get(handlers::get_legs_risk))
        .route("/:leg_id", get(handlers::get_leg_detail))
}
