//! HTTP handlers for route legs

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::models::{ComfortProfile, Waypoint};

use crate::error::{AppError, AppResult};
use crate::services::assessment::{LegAssessment, LegDetail};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    pub id: String,
    pub title: String,
    pub from: Waypoint,
    pub to: Waypoint,
    pub midpoint: Waypoint,
    pub distance: String,
    pub window: String,
    pub comfort: ComfortProfile,
    pub comfort_copy: String,
    pub buoys: Vec<String>,
}

/// Configured legs
pub async fn list_legs(State(state): State<AppState>) -> Json<Vec<LegSummary>> {
    let legs = state
        .config
        .legs
        .iter()
        .map(|leg| LegSummary {
            id: leg.id.clone(),
            title: leg.title(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            midpoint: leg.midpoint.clone(),
            distance: leg.distance.clone(),
            window: leg.window.clone(),
            comfort: leg.comfort,
            comfort_copy: leg.comfort_copy(),
            buoys: leg.buoys.clone(),
        })
        .collect();
    Json(legs)
}

/// Risk for every configured leg, from one retrieval cycle
pub async fn get_legs_risk(State(state): State<AppState>) -> Json<Vec<LegAssessment>> {
    let service = state.assessment_service();
    Json(service.assess_all(&state.config.legs).await)
}

/// One leg with its station readings and text forecast
pub async fn get_leg_detail(
    State(state): State<AppState>,
    Path(leg_id): Path<String>,
) -> AppResult<Json<LegDetail>> {
    let leg = state
        .config
        .legs
        .iter()
        .find(|leg| leg.id == leg_id)
        .ok_or_else(|| AppError::NotFound(format!("Leg {}", leg_id)))?;

    let service = state.assessment_service();
    Ok(Json(service.leg_detail(leg).await))
}
