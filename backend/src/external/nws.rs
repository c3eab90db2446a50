//! Gridded forecast API client
//!
//! Forecasts are resolved in two hops: `/points/{lat},{lon}` names the
//! grid's forecast URLs, which are then fetched for their `periods`.

use std::time::Duration;

use reqwest::{header, Client};
use serde::Deserialize;
use shared::models::ForecastPeriod;
use shared::types::GeoPoint;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

const GEO_JSON: &str = "application/geo+json";

/// Which forecast product to follow from the points lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastProduct {
    Hourly,
    Text,
}

#[derive(Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: Option<String>,
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

impl NwsClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.nws_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn points_url(&self, point: &GeoPoint) -> String {
        format!("{}/points/{}", self.base_url, point.to_query())
    }

    /// Fetch every period of one forecast product at a point
    pub async fn fetch_periods(
        &self,
        point: &GeoPoint,
        product: ForecastProduct,
    ) -> Result<Vec<ForecastPeriod>, UpstreamError> {
        let points: PointsResponse = self.get_json(&self.points_url(point)).await?;

        let url = match product {
            ForecastProduct::Hourly => points.properties.forecast_hourly,
            ForecastProduct::Text => points.properties.forecast,
        }
        .ok_or_else(|| {
            UpstreamError::NoData(format!("no {:?} forecast URL for {}", product, point))
        })?;

        let forecast: ForecastResponse = self.get_json(&url).await?;
        Ok(forecast.properties.periods)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, UpstreamError> {
        tracing::debug!("Fetching forecast resource {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, GEO_JSON)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Malformed(e.to_string()))
    }
}
