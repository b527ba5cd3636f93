//! Dashboard API controllers

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use qfleet_core::infrastructure::{CircuitBreaker, CircuitState};
use qfleet_metrics::domain::ConnectivityGraph;
use qfleet_metrics::infrastructure::ConnectivityGenerator;
use std::sync::Arc;
use std::time::Instant;

use crate::application::{ANONYMOUS_SESSION, RefreshCoordinator};
use crate::domain::{DashboardResponse, DataMode, RefreshRequest};
use crate::presentation::models::{ConnectivityQuery, ErrorResponse, HealthResponse, MetricsQuery};

/// Header identifying the logical caller for refresh coalescing
pub const SESSION_HEADER: &str = "x-session-id";

/// Application state shared by all handlers
#[derive(Clone)]
pub struct OrchestratorState {
    pub refresh_coordinator: Arc<RefreshCoordinator>,
    pub connectivity: Arc<ConnectivityGenerator>,
    pub live_circuit_breaker: Arc<CircuitBreaker>,
    pub startup_time: Instant,
}

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS_SESSION)
        .to_string()
}

/// GET /api/metrics - Fleet dashboard payload
#[utoipa::path(
    get,
    path = "/api/metrics",
    params(
        MetricsQuery,
        ("x-session-id" = Option<String>, Header, description = "Caller session used to coalesce overlapping refreshes")
    ),
    responses(
        (status = 200, description = "Aggregated fleet metrics", body = DashboardResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "metrics"
)]
#[tracing::instrument(skip(state, headers))]
pub async fn get_metrics(
    State(state): State<OrchestratorState>,
    headers: HeaderMap,
    Query(query): Query<MetricsQuery>,
) -> Json<DashboardResponse> {
    let request =
        RefreshRequest::new(DataMode::from_demo_flag(query.demo), session_id(&headers))
            .forced(query.force);

    let response = state.refresh_coordinator.refresh(request).await;
    Json(Arc::unwrap_or_clone(response))
}

/// GET /api/backends/{name}/connectivity - Simulated qubit coupling graph
#[utoipa::path(
    get,
    path = "/api/backends/{name}/connectivity",
    params(
        ("name" = String, Path, description = "Backend name"),
        ConnectivityQuery
    ),
    responses(
        (status = 200, description = "Qubit connectivity graph", body = ConnectivityGraph),
        (status = 404, description = "Not available outside demo mode", body = ErrorResponse)
    ),
    tag = "backends"
)]
#[tracing::instrument(skip(state))]
pub async fn get_connectivity(
    State(state): State<OrchestratorState>,
    Path(name): Path<String>,
    Query(query): Query<ConnectivityQuery>,
) -> Result<Json<ConnectivityGraph>, (StatusCode, Json<ErrorResponse>)> {
    if !query.demo {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NOT_FOUND",
                "Connectivity data is only available in demo mode",
            )),
        ));
    }

    Ok(Json(state.connectivity.generate(&name)))
}

/// GET /health - Service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<OrchestratorState>) -> Json<HealthResponse> {
    let circuit = state.live_circuit_breaker.get_state().await;
    let failures = state.live_circuit_breaker.get_failure_count().await;
    let synthetic_cache = if state
        .refresh_coordinator
        .orchestrator()
        .synthetic_cache_is_warm()
        .await
    {
        "warm"
    } else {
        "cold"
    };

    // Requests are still served from synthetic data while the live source is down.
    let (status, circuit_label) = match circuit {
        CircuitState::Closed => ("healthy", "closed"),
        CircuitState::HalfOpen => ("degraded", "half_open"),
        CircuitState::Open => ("degraded", "open"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.startup_time.elapsed().as_secs(),
        details: Some(serde_json::json!({
            "live_source": {
                "circuit": circuit_label,
                "failures": failures,
            },
            "synthetic_cache": synthetic_cache,
            "refreshes_in_flight": state.refresh_coordinator.in_flight(),
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_defaults_to_anonymous() {
        assert_eq!(session_id(&HeaderMap::new()), ANONYMOUS_SESSION);

        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers), ANONYMOUS_SESSION);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("tab-7"));
        assert_eq!(session_id(&headers), "tab-7");
    }
}
