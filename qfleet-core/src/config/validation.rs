//! Configuration validation module

use chrono::FixedOffset;

use crate::config::{
    AggregationConfig, LiveSourceConfig, LoggingConfig, RefreshConfig, ServerConfig,
    SyntheticConfig,
};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("Live source configuration error: {message}")]
    Live { message: String },

    #[error("Synthetic source configuration error: {message}")]
    Synthetic { message: String },

    #[error("Aggregation configuration error: {message}")]
    Aggregation { message: String },

    #[error("Refresh configuration error: {message}")]
    Refresh { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn live(message: impl Into<String>) -> Self {
        Self::Live {
            message: message.into(),
        }
    }

    pub fn synthetic(message: impl Into<String>) -> Self {
        Self::Synthetic {
            message: message.into(),
        }
    }

    pub fn aggregation(message: impl Into<String>) -> Self {
        Self::Aggregation {
            message: message.into(),
        }
    }

    pub fn refresh(message: impl Into<String>) -> Self {
        Self::Refresh {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so we only need to check for 0
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "compact" | "full" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Log format must be one of json, compact, full; got: {}",
                other
            ))),
        }
    }
}

impl Validate for LiveSourceConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::live(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::live(
                "timeout must be greater than 0 seconds",
            ));
        }

        if self.job_limit == 0 {
            return Err(ValidationError::live("job_limit must be greater than 0"));
        }

        if self.circuit_breaker.failure_threshold == 0 {
            return Err(ValidationError::live(
                "circuit_breaker.failure_threshold must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for SyntheticConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.cache_ttl_seconds == 0 {
            return Err(ValidationError::synthetic(
                "cache_ttl_seconds must be greater than 0",
            ));
        }

        if self.history_days == 0 {
            return Err(ValidationError::synthetic(
                "history_days must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for AggregationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.window_hours == 0 {
            return Err(ValidationError::aggregation(
                "window_hours must be greater than 0",
            ));
        }

        if self.bucket_count == 0 || self.bucket_count > 168 {
            return Err(ValidationError::aggregation(format!(
                "bucket_count must be in range 1-168, got {}",
                self.bucket_count
            )));
        }

        if self.bucket_width_minutes == 0 {
            return Err(ValidationError::aggregation(
                "bucket_width_minutes must be greater than 0",
            ));
        }

        if FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ValidationError::aggregation(format!(
                "utc_offset_minutes must be strictly within +/-24h, got {}",
                self.utc_offset_minutes
            )));
        }

        Ok(())
    }
}

impl Validate for RefreshConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.interval_seconds == 0 {
            return Err(ValidationError::refresh(
                "interval_seconds must be greater than 0 when refresh is enabled",
            ));
        }

        Ok(())
    }
}
