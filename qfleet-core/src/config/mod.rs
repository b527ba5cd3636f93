//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that overrides `live.base_url`
pub const BACKEND_API_URL_ENV: &str = "BACKEND_API_URL";

/// Circuit breaker configuration (serializable version)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfigSerializable {
    /// Number of consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Duration to wait before transitioning from Open to HalfOpen (in seconds)
    pub recovery_timeout_seconds: u64,
    /// Maximum number of requests allowed in HalfOpen state
    pub half_open_max_requests: u32,
    /// Timeout for individual requests (in seconds)
    pub request_timeout_seconds: u64,
}

impl Default for CircuitBreakerConfigSerializable {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            recovery_timeout_seconds: 30,
            half_open_max_requests: 1,
            request_timeout_seconds: 10,
        }
    }
}

impl CircuitBreakerConfigSerializable {
    /// Convert to the runtime CircuitBreakerConfig
    pub fn to_circuit_breaker_config(
        &self,
    ) -> crate::infrastructure::resilience::CircuitBreakerConfig {
        crate::infrastructure::resilience::CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            recovery_timeout: Duration::from_secs(self.recovery_timeout_seconds),
            half_open_max_requests: self.half_open_max_requests,
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub live: LiveSourceConfig,
    pub synthetic: SyntheticConfig,
    pub aggregation: AggregationConfig,
    pub refresh: RefreshConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI)
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// One of `json`, `compact` or `full`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Live fleet API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSourceConfig {
    /// Base URL exposing `/backends` and `/jobs`
    pub base_url: String,
    /// Value of the `limit` query parameter sent to `/jobs`
    pub job_limit: u32,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfigSerializable,
}

impl Default for LiveSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            job_limit: 5000,
            timeout_seconds: 10,
            circuit_breaker: CircuitBreakerConfigSerializable::default(),
        }
    }
}

/// Synthetic fleet generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Lifetime of the single-slot synthetic snapshot cache
    pub cache_ttl_seconds: u64,
    pub job_count: usize,
    /// Jobs are spread over this many days before "now"
    pub history_days: u32,
    /// Fixed seed for reproducible datasets; random when unset
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 60,
            job_count: 5000,
            history_days: 180,
            seed: None,
        }
    }
}

/// Aggregation window and bucketing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Trailing window used for live KPIs
    pub window_hours: u32,
    pub bucket_count: u32,
    pub bucket_width_minutes: u32,
    /// Offset from UTC used for day/week/month boundaries and chart labels
    pub utc_offset_minutes: i32,
    /// Number of window-filtered jobs returned to callers
    pub max_jobs_returned: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            window_hours: 12,
            bucket_count: 12,
            bucket_width_minutes: 60,
            utc_offset_minutes: 0,
            max_jobs_returned: 50,
        }
    }
}

impl AggregationConfig {
    /// Calendar offset for day/week/month boundaries. Falls back to UTC when out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }
}

/// Background refresh worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
    /// Refresh the synthetic source (true) or the live source (false)
    pub demo: bool,
    pub shutdown_timeout_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 15,
            demo: true,
            shutdown_timeout_seconds: 2,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        self.live.validate()?;
        self.synthetic.validate()?;
        self.aggregation.validate()?;
        self.refresh.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("QFLEET").separator("__"))
            .set_override_option(
                "live.base_url",
                std::env::var(BACKEND_API_URL_ENV)
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
            )?;

        let config: Config = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn utc_offset_defaults_to_utc() {
        let config = AggregationConfig::default();
        assert_eq!(config.utc_offset().local_minus_utc(), 0);
    }

    #[test]
    fn utc_offset_uses_configured_minutes() {
        let config = AggregationConfig {
            utc_offset_minutes: 330,
            ..AggregationConfig::default()
        };
        assert_eq!(config.utc_offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "live": { "base_url": "http://fleet.internal/api" },
            "synthetic": { "seed": 7 }
        }))
        .unwrap();

        assert_eq!(config.live.base_url, "http://fleet.internal/api");
        assert_eq!(config.live.job_limit, 5000);
        assert_eq!(config.synthetic.seed, Some(7));
        assert_eq!(config.synthetic.cache_ttl_seconds, 60);
        assert_eq!(config.aggregation.bucket_count, 12);
    }
}
