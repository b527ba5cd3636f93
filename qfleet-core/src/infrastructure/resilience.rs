//! Resilience patterns for upstream fleet API calls

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests are allowed through
    Closed,
    /// Requests are rejected immediately
    Open,
    /// A limited number of trial requests are allowed through
    HalfOpen,
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Duration to wait before transitioning from Open to HalfOpen
    pub recovery_timeout: Duration,
    /// Maximum number of requests allowed in HalfOpen state
    pub half_open_max_requests: u32,
    /// Timeout for individual requests
    pub request_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            recovery_timeout: Duration::from_secs(30),
            half_open_max_requests: 1,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Reason the breaker refused or abandoned a call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitRejection {
    #[error("circuit breaker is open")]
    Open,

    #[error("call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Circuit breaker for calls against an unreliable upstream.
///
/// - **Closed**: calls pass through, consecutive failures are counted
/// - **Open**: calls fail immediately with [`CircuitRejection::Open`]
/// - **HalfOpen**: after `recovery_timeout`, up to `half_open_max_requests`
///   trial requests are let through; one success closes the circuit, one failure reopens it
///
/// Every call is bounded by `request_timeout`; a timeout counts as a failure.
/// A trial request whose caller was dropped never reports back, so once a slot has
/// been held for longer than `request_timeout` it is handed to the next caller.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: Arc<Mutex<CircuitBreakerState>>,
}

#[derive(Debug)]
struct CircuitBreakerState {
    current_state: CircuitState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    half_open_requests: u32,
    last_trial_time: Option<Instant>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(CircuitBreakerState {
                current_state: CircuitState::Closed,
                failure_count: 0,
                last_failure_time: None,
                half_open_requests: 0,
                last_trial_time: None,
            })),
        }
    }

    /// Run `operation` under circuit breaker protection.
    ///
    /// The caller's error type absorbs breaker rejections through `From`.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: From<CircuitRejection>,
    {
        if !self.can_execute().await {
            return Err(CircuitRejection::Open.into());
        }

        match tokio::time::timeout(self.config.request_timeout, operation()).await {
            Ok(Ok(success)) => {
                self.on_success().await;
                Ok(success)
            }
            Ok(Err(error)) => {
                self.on_failure().await;
                Err(error)
            }
            Err(_) => {
                self.on_failure().await;
                Err(CircuitRejection::Timeout {
                    seconds: self.config.request_timeout.as_secs(),
                }
                .into())
            }
        }
    }

    async fn can_execute(&self) -> bool {
        let mut state = self.state.lock().await;

        match state.current_state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let recovered = state
                    .last_failure_time
                    .is_some_and(|last| last.elapsed() >= self.config.recovery_timeout);
                if recovered {
                    tracing::debug!("Circuit breaker entering half-open state");
                    state.current_state = CircuitState::HalfOpen;
                    state.half_open_requests = 1;
                    state.last_trial_time = Some(Instant::now());
                }
                recovered
            }
            CircuitState::HalfOpen => {
                if state.half_open_requests < self.config.half_open_max_requests {
                    state.half_open_requests += 1;
                    state.last_trial_time = Some(Instant::now());
                    true
                } else if state
                    .last_trial_time
                    .is_none_or(|trial| trial.elapsed() >= self.config.request_timeout)
                {
                    tracing::debug!("Reclaiming abandoned half-open trial slot");
                    state.half_open_requests = 1;
                    state.last_trial_time = Some(Instant::now());
                    true
                } else {
                    false
                }
            }
        }
    }

    async fn on_success(&self) {
        let mut state = self.state.lock().await;
        if state.current_state != CircuitState::Closed {
            tracing::info!("Circuit breaker closed after successful trial request");
        }
        state.current_state = CircuitState::Closed;
        state.failure_count = 0;
        state.half_open_requests = 0;
        state.last_trial_time = None;
    }

    async fn on_failure(&self) {
        let mut state = self.state.lock().await;

        state.failure_count += 1;
        state.last_failure_time = Some(Instant::now());

        match state.current_state {
            CircuitState::Closed => {
                if state.failure_count >= self.config.failure_threshold {
                    tracing::warn!(
                        failures = state.failure_count,
                        "Circuit breaker opened"
                    );
                    state.current_state = CircuitState::Open;
                }
            }
            CircuitState::HalfOpen => {
                state.current_state = CircuitState::Open;
                state.half_open_requests = 0;
            }
            CircuitState::Open => {}
        }
    }

    pub async fn get_state(&self) -> CircuitState {
        self.state.lock().await.current_state
    }

    pub async fn get_failure_count(&self) -> u32 {
        self.state.lock().await.failure_count
    }

}
