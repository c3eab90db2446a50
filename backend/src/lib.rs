//! Sail Risk Platform - Backend Service
//!
//! Serves buoy observations, normalized forecasts and per-leg go/no-go
//! risk for a planned sailing route.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use crate::error::UpstreamError;
use crate::external::{NdbcClient, NwsClient};
use crate::services::{
    AssessmentService, BuoyService, FleetAggregator, ForecastService, ForecastSource,
    ObservationSource,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub observations: Arc<dyn ObservationSource>,
    pub forecasts: Arc<dyn ForecastSource>,
}

impl AppState {
    /// State backed by the live upstream providers
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let buoys = BuoyService::new(
            NdbcClient::new(&config.upstream)?,
            config.cache.buoy_ttl_secs,
        );
        let forecasts = ForecastService::new(
            NwsClient::new(&config.upstream)?,
            config.cache.forecast_ttl_secs,
        );
        Ok(Self::with_sources(config, Arc::new(buoys), Arc::new(forecasts)))
    }

    pub fn with_sources(
        config: Config,
        observations: Arc<dyn ObservationSource>,
        forecasts: Arc<dyn ForecastSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            observations,
            forecasts,
        }
    }

    pub fn aggregator(&self) -> FleetAggregator {
        FleetAggregator::new(
            Arc::clone(&self.observations),
            Arc::clone(&self.forecasts),
            self.config.assessment.forecast_hours,
        )
    }

    pub fn assessment_service(&self) -> AssessmentService {
        AssessmentService::new(self.aggregator(), Arc::clone(&self.forecasts))
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Sail Risk Platform API v0.1"
}
