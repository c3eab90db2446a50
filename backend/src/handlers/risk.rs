//! Stateless risk classification endpoint

use axum::Json;
use serde::Deserialize;
use shared::models::{ComfortProfile, HourlyPoint, Observation};
use shared::risk::{evaluate, Evaluation};
use shared::validation::validate_comfort_profile;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub comfort: ComfortProfile,
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub hourly: Vec<HourlyPoint>,
}

/// Classify caller-supplied data without touching any upstream
pub async fn classify_risk(
    Json(input): Json<ClassifyRequest>,
) -> AppResult<Json<Evaluation>> {
    validate_comfort_profile(&input.comfort)
        .map_err(|msg| AppError::validation("comfort", msg))?;
    Ok(Json(evaluate(&input.comfort, &input.observations, &input.hourly)))
}
