//! Configuration management for the Sail Risk service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SAIL_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::models::{default_legs, LegConfig};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream provider endpoints
    pub upstream: UpstreamConfig,

    /// Response cache lifetimes
    pub cache: CacheConfig,

    /// Risk assessment settings
    pub assessment: AssessmentConfig,

    /// Route plan; the built-in Southern California legs when unset
    #[serde(default = "default_legs")]
    pub legs: Vec<LegConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the buoy realtime text reports
    pub ndbc_base_url: String,

    /// Base URL of the gridded forecast API
    pub nws_base_url: String,

    /// User-Agent sent upstream; the forecast API rejects anonymous clients
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Buoy observation lifetime in seconds (0 disables)
    pub buoy_ttl_secs: u64,

    /// Forecast lifetime in seconds (0 disables)
    pub forecast_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssessmentConfig {
    /// Hourly periods requested per leg
    pub forecast_hours: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SAIL_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.ndbc_base_url", DEFAULT_NDBC_BASE_URL)?
            .set_default("upstream.nws_base_url", DEFAULT_NWS_BASE_URL)?
            .set_default("upstream.user_agent", DEFAULT_USER_AGENT)?
            .set_default("upstream.request_timeout_secs", 15)?
            .set_default("cache.buoy_ttl_secs", 300)?
            .set_default("cache.forecast_ttl_secs", 900)?
            .set_default("assessment.forecast_hours", 12)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SAIL_ prefix)
            .add_source(
                Environment::with_prefix("SAIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject plans and settings the service cannot run with
    pub fn validate(&self) -> Result<(), String> {
        shared::validation::validate_legs(&self.legs)?;
        if self.upstream.request_timeout_secs == 0 {
            return Err("upstream.request_timeout_secs must be positive".to_string());
        }
        if self.assessment.forecast_hours < 1 {
            return Err("assessment.forecast_hours must be at least 1".to_string());
        }
        Ok(())
    }
}

pub const DEFAULT_NDBC_BASE_URL: &str = "https://www.ndbc.noaa.gov/data/realtime2";
pub const DEFAULT_NWS_BASE_URL: &str = "https://api.weather.gov";
pub const DEFAULT_USER_AGENT: &str = "sail-risk/0.1 (contact: ops@sail-risk.local)";

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            assessment: AssessmentConfig::default(),
            legs: default_legs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            ndbc_base_url: DEFAULT_NDBC_BASE_URL.to_string(),
            nws_base_url: DEFAULT_NWS_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            buoy_ttl_secs: 300,
            forecast_ttl_secs: 900,
        }
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self { forecast_hours: 12 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.legs.len(), 3);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.upstream.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_plan() {
        let mut config = Config::default();
        config.legs.clear();
        assert!(config.validate().is_err());
    }
}
