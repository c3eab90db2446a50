//! Forecast service: normalized hourly windows and text summaries

use async_trait::async_trait;
use shared::hourly::normalize_periods;
use shared::models::{ForecastPeriod, HourlyPoint};
use shared::types::GeoPoint;

use crate::error::UpstreamError;
use crate::external::{ForecastProduct, NwsClient, TtlCache};
use crate::services::fleet::ForecastSource;

/// Raw periods are cached per rounded coordinate and product
#[derive(Clone)]
pub struct ForecastService {
    client: NwsClient,
    cache: TtlCache<(String, ForecastProduct), Vec<ForecastPeriod>>,
}

impl ForecastService {
    pub fn new(client: NwsClient, cache_ttl_secs: u64) -> Self {
        Self {
            client,
            cache: TtlCache::from_secs(cache_ttl_secs),
        }
    }

    async fn periods(
        &self,
        point: GeoPoint,
        product: ForecastProduct,
    ) -> Result<Vec<ForecastPeriod>, UpstreamError> {
        let key = (point.to_query(), product);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let periods = self.client.fetch_periods(&point, product).await?;
        self.cache.insert(key, periods.clone()).await;
        Ok(periods)
    }
}

#[async_trait]
impl ForecastSource for ForecastService {
    async fn fetch_hourly(
        &self,
        point: GeoPoint,
        hours: i64,
    ) -> Result<Vec<HourlyPoint>, UpstreamError> {
        let periods = self.periods(point, ForecastProduct::Hourly).await?;
        Ok(normalize_periods(&periods, hours))
    }

    async fn fetch_summary(&self, point: GeoPoint) -> Result<Option<String>, UpstreamError> {
        let periods = self.periods(point, ForecastProduct::Text).await?;
        Ok(summarize_periods(&periods))
    }
}

/// The first period's detailed forecast, falling back to its short one
pub fn summarize_periods(periods: &[ForecastPeriod]) -> Option<String> {
    let first = periods.first()?;
    [&first.detailed_forecast, &first.short_forecast]
        .into_iter()
        .filter_map(|text| text.as_deref().map(str::trim))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
