//! Buoy realtime report client
//!
//! Fetches the raw `{station}.txt` report; decoding happens in
//! `shared::buoy`.

use std::time::Duration;

use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

#[derive(Clone)]
pub struct NdbcClient {
    client: Client,
    base_url: String,
}

impl NdbcClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.ndbc_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn report_url(&self, station_id: &str) -> String {
        format!("{}/{}.txt", self.base_url, station_id)
    }

    /// Fetch the raw report text for one station
    pub async fn fetch_report(&self, station_id: &str) -> Result<String, UpstreamError> {
        let url = self.report_url(station_id);
        tracing::debug!("Fetching buoy report {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}
