//! Application wiring shared by the server binary and integration tests

use axum::Router;
use qfleet_core::Config;
use qfleet_core::infrastructure::{CircuitBreaker, Clock, SystemClock};
use qfleet_metrics::AggregationPipeline;
use qfleet_metrics::infrastructure::{ConnectivityGenerator, SyntheticFleetGenerator};
use qfleet_orchestrator::domain::{DataMode, RefreshRequest};
use qfleet_orchestrator::infrastructure::{CircuitBreakerFleetClient, HttpFleetApiClient};
use qfleet_orchestrator::{
    DataSourceOrchestrator, OrchestratorState, RefreshCoordinator, create_router,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Session under which the background worker refreshes, kept apart from callers
pub const REFRESH_WORKER_SESSION: &str = "refresh-worker";

/// Router plus the token that stops background tasks on shutdown
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Spawns a background worker that periodically refreshes the dashboard data.
/// Ticks that arrive while a refresh is still running are skipped.
fn spawn_refresh_worker(
    coordinator: Arc<RefreshCoordinator>,
    config: &Config,
    shutdown_token: CancellationToken,
) {
    let refresh_config = config.refresh.clone();
    if !refresh_config.enabled || refresh_config.interval_seconds == 0 {
        tracing::info!("Background refresh worker disabled");
        return;
    }

    let interval = Duration::from_secs(refresh_config.interval_seconds);
    let mode = DataMode::from_demo_flag(refresh_config.demo);
    let is_refreshing = Arc::new(AtomicBool::new(false));

    tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(interval);
        // First tick completes immediately; the first request warms the cache instead
        interval_timer.tick().await;

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    if is_refreshing.swap(true, Ordering::SeqCst) {
                        tracing::debug!("Skipping periodic refresh - already in progress");
                        continue;
                    }

                    let request = RefreshRequest::new(mode, REFRESH_WORKER_SESSION);

                    tokio::select! {
                        response = coordinator.refresh(request) => {
                            tracing::debug!(
                                mode = mode.as_str(),
                                source = response.source.as_str(),
                                "Periodic refresh completed"
                            );
                        }
                        _ = shutdown_token.cancelled() => {
                            tracing::info!("Periodic refresh cancelled due to shutdown");
                            is_refreshing.store(false, Ordering::SeqCst);
                            return;
                        }
                    }

                    is_refreshing.store(false, Ordering::SeqCst);
                }
                _ = shutdown_token.cancelled() => {
                    tracing::info!("Refresh worker shutting down gracefully");
                    return;
                }
            }
        }
    });
}

/// Build the orchestrator state from configuration with an explicit clock
pub fn build_state(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<OrchestratorState, Box<dyn std::error::Error + Send + Sync>> {
    let circuit_breaker = Arc::new(CircuitBreaker::new(
        config.live.circuit_breaker.to_circuit_breaker_config(),
    ));
    let http_client = Arc::new(HttpFleetApiClient::new(&config.live)?);
    let live_client = Arc::new(CircuitBreakerFleetClient::new(
        http_client,
        circuit_breaker.clone(),
    ));

    let cache_ttl = chrono::Duration::seconds(i64::try_from(config.synthetic.cache_ttl_seconds)?);
    let orchestrator = Arc::new(DataSourceOrchestrator::new(
        live_client,
        Arc::new(SyntheticFleetGenerator::new(&config.synthetic)),
        AggregationPipeline::new(&config.aggregation),
        cache_ttl,
        clock,
        config.live.job_limit,
    ));

    tracing::info!(
        live_base_url = %config.live.base_url,
        cache_ttl_seconds = config.synthetic.cache_ttl_seconds,
        window_hours = config.aggregation.window_hours,
        "Data source orchestrator initialized"
    );

    Ok(OrchestratorState {
        refresh_coordinator: Arc::new(RefreshCoordinator::new(orchestrator)),
        connectivity: Arc::new(ConnectivityGenerator::new(&config.synthetic)),
        live_circuit_breaker: circuit_breaker,
        startup_time: Instant::now(),
    })
}

/// Create the application router and return an AppHandle for shutdown coordination
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let shutdown_token = CancellationToken::new();
    let state = build_state(&config, Arc::new(SystemClock))?;

    spawn_refresh_worker(
        state.refresh_coordinator.clone(),
        &config,
        shutdown_token.clone(),
    );

    let router = create_router(state, &config);

    Ok(AppHandle {
        router,
        shutdown_token,
    })
}
