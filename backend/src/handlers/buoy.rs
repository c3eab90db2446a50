//! HTTP handlers for buoy observation endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::models::Observation;
use shared::validation::{parse_station_ids, validate_station_id};

use crate::error::{AppError, AppResult, UpstreamError};
use crate::services::{ObservationSource, StationResult};
use crate::AppState;

pub const BUOY_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=900";

/// Single-station body; `error` whenever `obs` could not be produced
#[derive(Debug, Serialize)]
pub struct BuoyResponse {
    pub id: String,
    pub obs: Option<Observation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BuoyBatchResponse {
    pub ok: bool,
    pub results: Vec<StationResult>,
}

/// Latest observation for one station
pub async fn get_buoy(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Response> {
    validate_station_id(&station_id).map_err(|msg| AppError::validation("id", msg))?;

    let response = match state.observations.fetch_observation(&station_id).await {
        Ok(obs) => (
            StatusCode::OK,
            Json(BuoyResponse {
                id: station_id,
                obs,
                error: None,
            }),
        ),
        Err(err) => {
            tracing::warn!("Station {} unavailable: {}", station_id, err);
            let status = match &err {
                // The provider answered; only its report was unreadable
                UpstreamError::NoData(_) => StatusCode::OK,
                _ => StatusCode::BAD_GATEWAY,
            };
            (
                status,
                Json(BuoyResponse {
                    id: station_id,
                    obs: None,
                    error: Some(err.to_string()),
                }),
            )
        }
    };

    Ok(([(header::CACHE_CONTROL, BUOY_CACHE_CONTROL)], response).into_response())
}

#[derive(Debug, Deserialize)]
pub struct BuoyBatchQuery {
    pub ids: Option<String>,
}

/// Latest observations for a comma-separated list of stations
pub async fn get_buoys(
    State(state): State<AppState>,
    query: Result<Query<BuoyBatchQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let ids = parse_station_ids(query.ids.as_deref().unwrap_or_default());
    if ids.is_empty() {
        return Err(AppError::validation("ids", "At least one station id is required"));
    }
    for id in &ids {
        validate_station_id(id).map_err(|msg| AppError::validation("ids", msg))?;
    }

    let results = match state.observations.fetch_observations(&ids).await {
        Ok(results) => results,
        Err(err) => {
            // The batch never fails as a whole: each id carries the error
            tracing::warn!("Batched station retrieval failed: {}", err);
            ids.into_iter()
                .map(|id| StationResult::from_fetch(id, Err(err.clone())))
                .collect()
        }
    };

    Ok((
        [(header::CACHE_CONTROL, BUOY_CACHE_CONTROL)],
        Json(BuoyBatchResponse { ok: true, results }),
    )
        .into_response())
}
