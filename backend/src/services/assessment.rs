//! Leg assessment service
//!
//! Joins a fleet snapshot with the route plan and runs signal detection and
//! classification for every leg.

use std::sync::Arc;

use serde::Serialize;
use shared::models::{
    Advisory, HourlyPoint, LegConfig, Observation, RiskLevel, Signals, Status, Waypoint,
};
use shared::risk::evaluate;
use shared::units::degrees_to_compass_text;

use crate::services::fleet::{FleetAggregator, FleetSnapshot, ForecastSource};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegAssessment {
    pub leg_id: String,
    pub title: String,
    pub status: Status,
    pub risk: RiskLevel,
    pub rationale: String,
    pub signals: Signals,
    pub advisories: Vec<Advisory>,
    pub buoys: Vec<String>,
}

pub fn assess_leg(
    leg: &LegConfig,
    observations: &[Observation],
    hourly: &[HourlyPoint],
) -> LegAssessment {
    let evaluation = evaluate(&leg.comfort, observations, hourly);
    tracing::debug!(
        "Leg {} assessed {} ({})",
        leg.id,
        evaluation.result.status,
        evaluation.result.risk
    );
    LegAssessment {
        leg_id: leg.id.clone(),
        title: leg.title(),
        status: evaluation.result.status,
        risk: evaluation.result.risk,
        rationale: evaluation.result.rationale,
        signals: evaluation.signals,
        advisories: evaluation.advisories,
        buoys: leg.buoys.clone(),
    }
}

pub fn assess_fleet(legs: &[LegConfig], snapshot: &FleetSnapshot) -> Vec<LegAssessment> {
    legs.iter()
        .map(|leg| {
            let observations = snapshot.observations_for(leg);
            assess_leg(leg, &observations, snapshot.hourly_for(&leg.id))
        })
        .collect()
}

/// One watched station as shown on a leg's detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReading {
    pub id: String,
    pub obs: Option<Observation>,
    pub wind_direction_text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDetail {
    #[serde(flatten)]
    pub assessment: LegAssessment,
    pub from: Waypoint,
    pub to: Waypoint,
    pub midpoint: Waypoint,
    pub distance: String,
    pub window: String,
    pub comfort_copy: String,
    pub stations: Vec<StationReading>,
    pub hourly: Vec<HourlyPoint>,
    pub forecast_summary: Option<String>,
}

pub struct AssessmentService {
    aggregator: FleetAggregator,
    forecasts: Arc<dyn ForecastSource>,
}

impl AssessmentService {
    pub fn new(aggregator: FleetAggregator, forecasts: Arc<dyn ForecastSource>) -> Self {
        Self {
            aggregator,
            forecasts,
        }
    }

    /// One cycle over the whole plan
    pub async fn assess_all(&self, legs: &[LegConfig]) -> Vec<LegAssessment> {
        let snapshot = self.aggregator.gather(legs).await;
        assess_fleet(legs, &snapshot)
    }

    /// One cycle over a single leg, with per-station readings and the text forecast
    pub async fn leg_detail(&self, leg: &LegConfig) -> LegDetail {
        let legs = std::slice::from_ref(leg);
        let (snapshot, summary) = tokio::join!(
            self.aggregator.gather(legs),
            self.forecasts.fetch_summary(leg.center())
        );

        let forecast_summary = summary.unwrap_or_else(|err| {
            tracing::warn!("Text forecast for leg {} unavailable: {}", leg.id, err);
            None
        });

        let stations = leg
            .buoys
            .iter()
            .map(|id| {
                let obs = snapshot.observations.get(id).cloned().flatten();
                StationReading {
                    id: id.clone(),
                    wind_direction_text: degrees_to_compass_text(
                        obs.as_ref().and_then(|o| o.wind_direction_deg),
                    )
                    .to_string(),
                    obs,
                }
            })
            .collect();

        let observations = snapshot.observations_for(leg);
        let hourly = snapshot.hourly_for(&leg.id).to_vec();

        LegDetail {
            assessment: assess_leg(leg, &observations, &hourly),
            from: leg.from.clone(),
            to: leg.to.clone(),
            midpoint: leg.midpoint.clone(),
            distance: leg.distance.clone(),
            window: leg.window.clone(),
            comfort_copy: leg.comfort_copy(),
            stations,
            hourly,
            forecast_summary,
        }
    }
}
