//! Sail Risk Platform - Backend Server

use std::net::SocketAddr;

use anyhow::Context;
use sail_risk_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sail_risk_server=debug,sail_risk_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid configuration: {}", msg))?;

    tracing::info!("Starting Sail Risk Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Watching {} legs, forecasts {} h ahead",
        config.legs.len(),
        config.assessment.forecast_hours
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.host))?;

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
