//! API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `GET /api/metrics`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MetricsQuery {
    /// Serve synthetic data instead of querying the live fleet API
    #[serde(default)]
    pub demo: bool,
    /// Bypass the synthetic snapshot cache and request coalescing
    #[serde(default)]
    pub force: bool,
}

/// Query parameters for `GET /api/backends/{name}/connectivity`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConnectivityQuery {
    /// Connectivity graphs are only simulated in demo mode
    #[serde(default)]
    pub demo: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "Connectivity data is only available in demo mode")]
    pub message: String,

    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service health status
    #[schema(example = "healthy")]
    pub status: String,

    /// Current service version
    #[schema(example = "0.1.0")]
    pub version: String,

    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: DateTime<Utc>,

    pub uptime_seconds: u64,

    /// Live source circuit state and refresh bookkeeping
    #[schema(example = r#"{"live_source": {"circuit": "closed", "failures": 0}, "synthetic_cache": "warm", "refreshes_in_flight": 0}"#)]
    pub details: Option<serde_json::Value>,
}
