//! Buoy observation service

use std::collections::HashMap;

use async_trait::async_trait;
use shared::buoy::parse_report_detailed;
use shared::models::Observation;
use tokio::task::JoinSet;

use crate::error::UpstreamError;
use crate::external::{NdbcClient, TtlCache};
use crate::services::fleet::{dedupe_ids, ObservationSource, StationResult};

/// Fetches and decodes station reports, behind a TTL cache keyed by station id.
/// An unreadable report is cached with its reason, like a decoded one.
#[derive(Clone)]
pub struct BuoyService {
    client: NdbcClient,
    cache: TtlCache<String, Result<Observation, String>>,
}

impl BuoyService {
    pub fn new(client: NdbcClient, cache_ttl_secs: u64) -> Self {
        Self {
            client,
            cache: TtlCache::from_secs(cache_ttl_secs),
        }
    }

    /// Latest observation. An unreadable report is `UpstreamError::NoData`
    /// carrying the decoder's reason.
    pub async fn latest(&self, station_id: &str) -> Result<Option<Observation>, UpstreamError> {
        let key = station_id.to_string();
        let decoded = match self.cache.get(&key).await {
            Some(hit) => hit,
            None => {
                let text = self.client.fetch_report(station_id).await?;
                let decoded = parse_report_detailed(&text).map_err(|err| {
                    tracing::warn!("Station {} report unreadable: {}", station_id, err);
                    err.to_string()
                });
                self.cache.insert(key, decoded.clone()).await;
                decoded
            }
        };

        decoded.map(Some).map_err(UpstreamError::NoData)
    }
}

#[async_trait]
impl ObservationSource for BuoyService {
    async fn fetch_observation(
        &self,
        station_id: &str,
    ) -> Result<Option<Observation>, UpstreamError> {
        self.latest(station_id).await
    }

    async fn fetch_observations(
        &self,
        station_ids: &[String],
    ) -> Result<Vec<StationResult>, UpstreamError> {
        let mut set = JoinSet::new();
        for id in dedupe_ids(station_ids) {
            let service = self.clone();
            set.spawn(async move {
                let result = service.latest(&id).await;
                StationResult::from_fetch(id, result)
            });
        }

        let mut by_id = HashMap::with_capacity(station_ids.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => {
                    by_id.insert(result.id.clone(), result);
                }
                Err(err) => tracing::warn!("Station retrieval task failed: {}", err),
            }
        }

        Ok(in_request_order(station_ids, &by_id))
    }
}

/// One result per requested id; duplicates share a fetch, and an id whose
/// task never reported back is a transport failure.
fn in_request_order(
    station_ids: &[String],
    by_id: &HashMap<String, StationResult>,
) -> Vec<StationResult> {
    station_ids
        .iter()
        .map(|id| {
            by_id.get(id).cloned().unwrap_or_else(|| {
                StationResult::from_fetch(
                    id.clone(),
                    Err(UpstreamError::Transport("retrieval task aborted".to_string())),
                )
            })
        })
        .collect()
}
