//! Fleet aggregation: one retrieval cycle over every watched station and leg
//!
//! Station ids shared between legs are fetched once. Observations come from
//! one batched call, with individual retries for anything the batch missed.
//! Hourly forecasts are fetched per leg midpoint, concurrently with the
//! station work. Every failure degrades its own unit of work to `None` or an
//! empty window and is logged; a cycle always completes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use shared::models::{HourlyPoint, LegConfig, Observation};
use shared::types::GeoPoint;
use tokio::task::JoinSet;

use crate::error::UpstreamError;

/// Outcome of one station in a batched retrieval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationResult {
    pub id: String,
    pub ok: bool,
    pub obs: Option<Observation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StationResult {
    pub fn from_fetch(id: String, result: Result<Option<Observation>, UpstreamError>) -> Self {
        match result {
            Ok(obs) => Self {
                id,
                ok: true,
                obs,
                status: None,
                error: None,
            },
            Err(err) => Self {
                id,
                ok: false,
                obs: None,
                status: err.status(),
                error: Some(err.to_string()),
            },
        }
    }
}

/// Source of decoded buoy observations
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Latest observation of one station; an unreadable report is `UpstreamError::NoData`
    async fn fetch_observation(&self, station_id: &str)
        -> Result<Option<Observation>, UpstreamError>;

    /// One result per requested id, in request order
    async fn fetch_observations(
        &self,
        station_ids: &[String],
    ) -> Result<Vec<StationResult>, UpstreamError>;
}

/// Source of normalized forecasts at a point
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Up to `clamp_hours(hours)` normalized periods, in provider order
    async fn fetch_hourly(
        &self,
        point: GeoPoint,
        hours: i64,
    ) -> Result<Vec<HourlyPoint>, UpstreamError>;

    /// Text summary of the nearest forecast period
    async fn fetch_summary(&self, point: GeoPoint) -> Result<Option<String>, UpstreamError>;
}

/// Everything one cycle retrieved
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    /// Every unique watched station; `None` when it could not be retrieved
    pub observations: HashMap<String, Option<Observation>>,
    /// Every leg id; empty when its forecast could not be retrieved
    pub hourly: HashMap<String, Vec<HourlyPoint>>,
}

impl FleetSnapshot {
    /// The decoded observations of a leg's watched stations
    pub fn observations_for(&self, leg: &LegConfig) -> Vec<Observation> {
        leg.buoys
            .iter()
            .filter_map(|id| self.observations.get(id).cloned().flatten())
            .collect()
    }

    pub fn hourly_for(&self, leg_id: &str) -> &[HourlyPoint] {
        self.hourly.get(leg_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stations_with_data(&self) -> usize {
        self.observations.values().filter(|o| o.is_some()).count()
    }
}

/// Unique station ids across legs, in first-seen order
pub fn unique_station_ids(legs: &[LegConfig]) -> Vec<String> {
    dedupe_ids(legs.iter().flat_map(|leg| leg.buoys.iter()))
}

pub fn dedupe_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[derive(Clone)]
pub struct FleetAggregator {
    observations: Arc<dyn ObservationSource>,
    forecasts: Arc<dyn ForecastSource>,
    forecast_hours: i64,
}

impl FleetAggregator {
    pub fn new(
        observations: Arc<dyn ObservationSource>,
        forecasts: Arc<dyn ForecastSource>,
        forecast_hours: i64,
    ) -> Self {
        Self {
            observations,
            forecasts,
            forecast_hours,
        }
    }

    /// Run one retrieval cycle for a set of legs
    pub async fn gather(&self, legs: &[LegConfig]) -> FleetSnapshot {
        let station_ids = unique_station_ids(legs);

        let (observations, hourly) = tokio::join!(
            self.gather_observations(&station_ids),
            self.gather_hourly(legs)
        );

        let snapshot = FleetSnapshot {
            observations,
            hourly,
        };
        tracing::info!(
            "Fleet cycle complete: {}/{} stations with data, {} legs",
            snapshot.stations_with_data(),
            station_ids.len(),
            legs.len()
        );
        snapshot
    }

    /// Batch first, then retry each id the batch left empty
    pub async fn gather_observations(
        &self,
        station_ids: &[String],
    ) -> HashMap<String, Option<Observation>> {
        let station_ids = dedupe_ids(station_ids);
        let mut observations: HashMap<String, Option<Observation>> =
            station_ids.iter().map(|id| (id.clone(), None)).collect();
        if station_ids.is_empty() {
            return observations;
        }

        match self.observations.fetch_observations(&station_ids).await {
            Ok(results) => {
                for result in results {
                    // Ids the caller did not ask for are ignored
                    if let Some(slot) = observations.get_mut(&result.id) {
                        if slot.is_none() {
                            *slot = result.obs;
                        }
                    }
                }
            }
            Err(err) => tracing::warn!("Batched station retrieval failed: {}", err),
        }

        let missing: Vec<String> = station_ids
            .iter()
            .filter(|id| matches!(observations.get(*id), Some(None)))
            .cloned()
            .collect();

        let mut set = JoinSet::new();
        for id in missing {
            let source = Arc::clone(&self.observations);
            set.spawn(async move {
                let result = source.fetch_observation(&id).await;
                (id, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((id, Ok(Some(obs)))) => {
                    observations.insert(id, Some(obs));
                }
                Ok((id, Ok(None))) => {
                    tracing::warn!("Station {} returned no usable observation", id);
                }
                Ok((id, Err(err))) => {
                    tracing::warn!("Station {} unavailable: {}", id, err);
                }
                Err(err) => tracing::warn!("Station retrieval task failed: {}", err),
            }
        }

        observations
    }

    /// One hourly forecast per leg, fetched at its midpoint
    pub async fn gather_hourly(&self, legs: &[LegConfig]) -> HashMap<String, Vec<HourlyPoint>> {
        let mut hourly: HashMap<String, Vec<HourlyPoint>> =
            legs.iter().map(|leg| (leg.id.clone(), Vec::new())).collect();

        let mut set = JoinSet::new();
        for leg in legs {
            let source = Arc::clone(&self.forecasts);
            let leg_id = leg.id.clone();
            let point = leg.midpoint.point();
            let hours = self.forecast_hours;
            set.spawn(async move {
                let result = source.fetch_hourly(point, hours).await;
                (leg_id, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((leg_id, Ok(points))) => {
                    hourly.insert(leg_id, points);
                }
                Ok((leg_id, Err(err))) => {
                    tracing::warn!("Hourly forecast for leg {} unavailable: {}", leg_id, err);
                }
                Err(err) => tracing::warn!("Forecast retrieval task failed: {}", err),
            }
        }

        hourly
    }
}
