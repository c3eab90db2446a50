//! Health check handlers

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct PingResponse {
    pub ok: bool,
    /// Server time, epoch milliseconds
    pub now: i64,
}

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        now: Utc::now().timestamp_millis(),
    })
}
