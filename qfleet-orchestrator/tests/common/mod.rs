//! Shared helpers for the orchestrator integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use qfleet_core::Config;
use qfleet_core::infrastructure::{CircuitBreaker, Clock, SystemClock};
use qfleet_metrics::AggregationPipeline;
use qfleet_metrics::infrastructure::{ConnectivityGenerator, SyntheticFleetGenerator};
use qfleet_orchestrator::infrastructure::{CircuitBreakerFleetClient, HttpFleetApiClient};
use qfleet_orchestrator::{DataSourceOrchestrator, OrchestratorState, RefreshCoordinator, create_router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

/// Small, seeded configuration pointing the live client at `base_url`
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.live.base_url = base_url.to_string();
    config.live.timeout_seconds = 2;
    config.synthetic.job_count = 300;
    config.synthetic.seed = Some(42);
    config.server.enable_docs = false;
    config
}

pub fn build_state(config: &Config, clock: Arc<dyn Clock>) -> OrchestratorState {
    let http_client =
        HttpFleetApiClient::new(&config.live).expect("HTTP client should build");
    let circuit_breaker = Arc::new(CircuitBreaker::new(
        config.live.circuit_breaker.to_circuit_breaker_config(),
    ));
    let live = Arc::new(CircuitBreakerFleetClient::new(
        Arc::new(http_client),
        circuit_breaker.clone(),
    ));

    let orchestrator = DataSourceOrchestrator::new(
        live,
        Arc::new(SyntheticFleetGenerator::new(&config.synthetic)),
        AggregationPipeline::new(&config.aggregation),
        chrono::Duration::seconds(config.synthetic.cache_ttl_seconds as i64),
        clock,
        config.live.job_limit,
    );

    OrchestratorState {
        refresh_coordinator: Arc::new(RefreshCoordinator::new(Arc::new(orchestrator))),
        connectivity: Arc::new(ConnectivityGenerator::new(&config.synthetic)),
        live_circuit_breaker: circuit_breaker,
        startup_time: Instant::now(),
    }
}

pub fn build_router(config: &Config) -> Router {
    create_router(build_state(config, Arc::new(SystemClock)), config)
}

/// Issue a GET and decode the JSON body
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
