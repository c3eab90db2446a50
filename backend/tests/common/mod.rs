//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

pub mod upstream;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sail_risk_backend::error::UpstreamError;
use sail_risk_backend::services::{ForecastSource, ObservationSource, StationResult};
use shared::hourly::clamp_hours;
use shared::models::{HourlyPoint, Observation};
use shared::types::GeoPoint;

pub fn observation(wind: f64, gust: f64, wave_feet: f64, direction: f64) -> Observation {
    Observation {
        time: Some("2024-06-01T12:00:00Z".to_string()),
        wind_direction_deg: Some(direction),
        sustained_wind_knots: Some(wind),
        gust_knots: Some(gust),
        wave_height_feet: Some(wave_feet),
        dominant_wave_period_seconds: Some(9.0),
        ..Default::default()
    }
}

pub fn hour(wind: f64, gust: f64, text: &str) -> HourlyPoint {
    HourlyPoint {
        time: Some("2024-06-01T12:00:00-07:00".to_string()),
        wind_knots: Some(wind),
        gust_knots: Some(gust),
        direction_deg: Some(270.0),
        direction_text: Some("W".to_string()),
        short_forecast_text: Some(text.to_string()),
    }
}

/// Station data keyed by id; unknown ids answer 404
#[derive(Default)]
pub struct InMemoryObservations {
    pub stations: HashMap<String, Result<Option<Observation>, UpstreamError>>,
    /// Ids the batch call leaves out of its results
    pub batch_omits: HashSet<String>,
    /// Ids the batch call answers with `obs: null`
    pub batch_nulls: HashSet<String>,
    pub batch_fails: bool,
    pub batch_requests: Mutex<Vec<Vec<String>>>,
    pub single_requests: Mutex<Vec<String>>,
}

impl InMemoryObservations {
    pub fn with_station(mut self, id: &str, obs: Observation) -> Self {
        self.stations.insert(id.to_string(), Ok(Some(obs)));
        self
    }

    pub fn with_failure(mut self, id: &str, err: UpstreamError) -> Self {
        self.stations.insert(id.to_string(), Err(err));
        self
    }

    fn lookup(&self, id: &str) -> Result<Option<Observation>, UpstreamError> {
        self.stations
            .get(id)
            .cloned()
            .unwrap_or(Err(UpstreamError::Status(404)))
    }

    pub fn single_requests(&self) -> Vec<String> {
        let mut ids = self.single_requests.lock().unwrap().clone();
        ids.sort();
        ids
    }

    pub fn batch_requests(&self) -> Vec<Vec<String>> {
        self.batch_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObservationSource for InMemoryObservations {
    async fn fetch_observation(
        &self,
        station_id: &str,
    ) -> Result<Option<Observation>, UpstreamError> {
        self.single_requests
            .lock()
            .unwrap()
            .push(station_id.to_string());
        self.lookup(station_id)
    }

    async fn fetch_observations(
        &self,
        station_ids: &[String],
    ) -> Result<Vec<StationResult>, UpstreamError> {
        self.batch_requests
            .lock()
            .unwrap()
            .push(station_ids.to_vec());
        if self.batch_fails {
            return Err(UpstreamError::Transport("connection reset".to_string()));
        }

        Ok(station_ids
            .iter()
            .filter(|id| !self.batch_omits.contains(*id))
            .map(|id| {
                let result = if self.batch_nulls.contains(id) {
                    Ok(None)
                } else {
                    self.lookup(id)
                };
                StationResult::from_fetch(id.clone(), result)
            })
            .collect())
    }
}

/// Hourly windows keyed by `GeoPoint::to_query`; unknown points have no periods
#[derive(Default)]
pub struct InMemoryForecasts {
    pub hourly: HashMap<String, Result<Vec<HourlyPoint>, UpstreamError>>,
    pub summary: Option<Result<Option<String>, UpstreamError>>,
    pub hourly_calls: AtomicUsize,
}

impl InMemoryForecasts {
    pub fn with_hourly(mut self, point: GeoPoint, points: Vec<HourlyPoint>) -> Self {
        self.hourly.insert(point.to_query(), Ok(points));
        self
    }

    pub fn with_hourly_failure(mut self, point: GeoPoint, err: UpstreamError) -> Self {
        self.hourly.insert(point.to_query(), Err(err));
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(Ok(Some(summary.to_string())));
        self
    }

    pub fn hourly_calls(&self) -> usize {
        self.hourly_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastSource for InMemoryForecasts {
    async fn fetch_hourly(
        &self,
        point: GeoPoint,
        hours: i64,
    ) -> Result<Vec<HourlyPoint>, UpstreamError> {
        self.hourly_calls.fetch_add(1, Ordering::SeqCst);
        let points = self
            .hourly
            .get(&point.to_query())
            .cloned()
            .unwrap_or(Ok(Vec::new()))?;
        Ok(points.into_iter().take(clamp_hours(hours)).collect())
    }

    async fn fetch_summary(&self, _point: GeoPoint) -> Result<Option<String>, UpstreamError> {
        self.summary.clone().unwrap_or(Ok(None))
    }
}
