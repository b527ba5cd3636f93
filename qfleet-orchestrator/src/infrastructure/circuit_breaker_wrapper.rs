//! Circuit breaker for the live fleet client

use async_trait::async_trait;
use qfleet_core::infrastructure::CircuitBreaker;
use serde_json::Value;
use std::sync::Arc;

use super::live_client::{FetchError, FleetApiClient, RawFleet};

/// Wrapper that adds circuit breaker protection to a fleet client.
///
/// A snapshot counts as one call against the breaker, so both legs of a
/// fetch cycle share a single half-open slot.
pub struct CircuitBreakerFleetClient {
    inner: Arc<dyn FleetApiClient>,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl CircuitBreakerFleetClient {
    pub fn new(inner: Arc<dyn FleetApiClient>, circuit_breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            inner,
            circuit_breaker,
        }
    }
}

#[async_trait]
impl FleetApiClient for CircuitBreakerFleetClient {
    async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError> {
        let inner = self.inner.clone();
        self.circuit_breaker
            .execute(move || async move { inner.fetch_backends().await })
            .await
    }

    async fn fetch_jobs(&self, limit: u32) -> Result<Vec<Value>, FetchError> {
        let inner = self.inner.clone();
        self.circuit_breaker
            .execute(move || async move { inner.fetch_jobs(limit).await })
            .await
    }

    async fn fetch_snapshot(&self, limit: u32) -> Result<RawFleet, FetchError> {
        let inner = self.inner.clone();
        self.circuit_breaker
            .execute(move || async move { inner.fetch_snapshot(limit).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfleet_core::infrastructure::{CircuitBreakerConfig, CircuitState};
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    struct FailingClient {
        calls: AtomicU32,
    }

    #[async_trait]
    impl FleetApiClient for FailingClient {
        async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Http {
                endpoint: "/backends".to_string(),
                status: 500,
            })
        }

        async fn fetch_jobs(&self, _limit: u32) -> Result<Vec<Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn open_circuit_short_circuits_calls() {
        let inner = Arc::new(FailingClient {
            calls: AtomicU32::new(0),
        });
        let breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 2,
            recovery_timeout: Duration::from_secs(60),
            half_open_max_requests: 1,
            request_timeout: Duration::from_secs(1),
        }));
        let client = CircuitBreakerFleetClient::new(inner.clone(), breaker.clone());

        assert!(matches!(client.fetch_backends().await, Err(FetchError::Http { .. })));
        assert!(matches!(client.fetch_backends().await, Err(FetchError::Http { .. })));
        assert_eq!(breaker.get_state().await, CircuitState::Open);

        assert!(matches!(client.fetch_jobs(10).await, Err(FetchError::CircuitOpen)));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    /// Upstream that fails until it is marked healthy
    struct RecoveringClient {
        healthy: AtomicBool,
    }

    #[async_trait]
    impl FleetApiClient for RecoveringClient {
        async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if self.healthy.load(Ordering::SeqCst) {
                Ok(Vec::new())
            } else {
                Err(FetchError::Http {
                    endpoint: "/backends".to_string(),
                    status: 500,
                })
            }
        }

        async fn fetch_jobs(&self, _limit: u32) -> Result<Vec<Value>, FetchError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn snapshot_recovers_after_recovery_timeout() {
        let inner = Arc::new(RecoveringClient {
            healthy: AtomicBool::new(false),
        });
        let breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 1,
            recovery_timeout: Duration::from_millis(50),
            half_open_max_requests: 1,
            request_timeout: Duration::from_secs(1),
        }));
        let client = CircuitBreakerFleetClient::new(inner.clone(), breaker.clone());

        assert!(client.fetch_snapshot(10).await.is_err());
        assert_eq!(breaker.get_state().await, CircuitState::Open);

        inner.healthy.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(client.fetch_snapshot(10).await.is_ok());
        assert_eq!(breaker.get_state().await, CircuitState::Closed);
    }
}
