//! HTTP client for the live fleet API

use async_trait::async_trait;
use qfleet_core::config::LiveSourceConfig;
use qfleet_core::infrastructure::CircuitRejection;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a payload from the live source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{endpoint} returned HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid JSON array from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("live source circuit is open")]
    CircuitOpen,
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Transport(error.to_string())
    }
}

impl From<CircuitRejection> for FetchError {
    fn from(rejection: CircuitRejection) -> Self {
        match rejection {
            CircuitRejection::Open => FetchError::CircuitOpen,
            CircuitRejection::Timeout { seconds } => FetchError::Timeout { seconds },
        }
    }
}

/// Raw backend and job records from one fetch cycle
#[derive(Debug, Clone, Default)]
pub struct RawFleet {
    pub backends: Vec<Value>,
    pub jobs: Vec<Value>,
}

/// Raw record source for the live fleet; records are normalized downstream
#[async_trait]
pub trait FleetApiClient: Send + Sync {
    async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError>;

    async fn fetch_jobs(&self, limit: u32) -> Result<Vec<Value>, FetchError>;

    /// Both endpoints concurrently; the first failure fails the cycle
    async fn fetch_snapshot(&self, limit: u32) -> Result<RawFleet, FetchError> {
        let (backends, jobs) = tokio::try_join!(self.fetch_backends(), self.fetch_jobs(limit))?;
        Ok(RawFleet { backends, jobs })
    }
}

/// Reqwest-backed client for `{base_url}/backends` and `{base_url}/jobs`
pub struct HttpFleetApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_seconds: u64,
}

impl HttpFleetApiClient {
    pub fn new(config: &LiveSourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("qfleet-telemetry/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn request_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else {
            FetchError::from(error)
        }
    }

    async fn get_array(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "Fetching from live fleet API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        serde_json::from_slice::<Vec<Value>>(&body).map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FleetApiClient for HttpFleetApiClient {
    async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError> {
        self.get_array("/backends", &[]).await
    }

    async fn fetch_jobs(&self, limit: u32) -> Result<Vec<Value>, FetchError> {
        self.get_array("/jobs", &[("limit", limit.to_string())]).await
    }
}
