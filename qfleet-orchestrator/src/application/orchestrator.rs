//! Data source selection, caching and fallback

use chrono::Duration;
use qfleet_core::infrastructure::{Clock, SnapshotCache};
use qfleet_metrics::application::{normalize_backends, normalize_jobs};
use qfleet_metrics::domain::{FleetSnapshot, SourceTelemetry};
use qfleet_metrics::infrastructure::SyntheticFleetGenerator;
use qfleet_metrics::{AggregationPipeline, FleetReport};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{DashboardResponse, DataMode, DataSource};
use crate::infrastructure::{FetchError, FleetApiClient};

/// Advisory attached to synthetic data served in place of a failed live fetch
pub const FALLBACK_NOTE: &str = "Real API failed, fallback to mock data.";

/// Produces dashboard payloads from the live API or the synthetic generator.
///
/// Synthetic reports are kept in a single-slot cache; a failed live attempt
/// falls back to a fresh synthetic report instead of surfacing an error.
pub struct DataSourceOrchestrator {
    live: Arc<dyn FleetApiClient>,
    generator: Arc<SyntheticFleetGenerator>,
    pipeline: AggregationPipeline,
    cache: SnapshotCache<FleetReport>,
    clock: Arc<dyn Clock>,
    job_limit: u32,
}

impl DataSourceOrchestrator {
    pub fn new(
        live: Arc<dyn FleetApiClient>,
        generator: Arc<SyntheticFleetGenerator>,
        pipeline: AggregationPipeline,
        cache_ttl: Duration,
        clock: Arc<dyn Clock>,
        job_limit: u32,
    ) -> Self {
        Self {
            live,
            generator,
            pipeline,
            cache: SnapshotCache::new(cache_ttl),
            clock,
            job_limit,
        }
    }

    #[tracing::instrument(skip(self, mode), fields(mode = mode.as_str()))]
    pub async fn dashboard(&self, mode: DataMode, force: bool) -> DashboardResponse {
        match mode {
            DataMode::Synthetic => self.synthetic(force).await,
            DataMode::Live => match self.live().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, "Live fleet fetch failed, serving synthetic data");
                    DashboardResponse {
                        note: Some(FALLBACK_NOTE.to_string()),
                        ..self.synthetic(true).await
                    }
                }
            },
        }
    }

    /// Whether a synthetic request would be served from the cache right now
    pub async fn synthetic_cache_is_warm(&self) -> bool {
        !self.cache.is_expired(self.clock.now()).await
    }

    /// Serve the cached synthetic report unless it expired or `force` is set
    async fn synthetic(&self, force: bool) -> DashboardResponse {
        let now = self.clock.now();

        if !force {
            if let Some(report) = self.cache.get(now).await {
                tracing::debug!("Serving synthetic report from cache");
                return DashboardResponse {
                    report,
                    source: DataSource::MockCached,
                    note: None,
                };
            }
        }

        let snapshot = self.generator.generate(now);
        let report = self.pipeline.run(&snapshot, now);
        self.cache.set(report.clone(), now).await;

        tracing::info!(jobs = snapshot.jobs.len(), "Generated synthetic fleet report");

        DashboardResponse {
            report,
            source: DataSource::Mock,
            note: None,
        }
    }

    async fn live(&self) -> Result<DashboardResponse, FetchError> {
        let started = Instant::now();
        let raw = self.live.fetch_snapshot(self.job_limit).await?;
        let api_speed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let backends = normalize_backends(&raw.backends);
        let jobs = normalize_jobs(&raw.jobs);

        tracing::info!(
            backends = backends.accepted.len(),
            jobs = jobs.accepted.len(),
            rejected = backends.rejected + jobs.rejected,
            api_speed_ms,
            "Fetched live fleet snapshot"
        );

        let snapshot = FleetSnapshot {
            backends: backends.accepted,
            jobs: jobs.accepted,
            telemetry: SourceTelemetry {
                // The live API does not expose session counts
                open_sessions: 1,
                api_speed_ms: Some(api_speed_ms),
            },
        };

        Ok(DashboardResponse {
            report: self.pipeline.run(&snapshot, self.clock.now()),
            source: DataSource::Real,
            note: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use qfleet_core::config::SyntheticConfig;
    use qfleet_core::infrastructure::ManualClock;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StubClient {
        fail_jobs: bool,
        calls: AtomicU32,
    }

    #[async_trait]
    impl FleetApiClient for StubClient {
        async fn fetch_backends(&self) -> Result<Vec<Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![json!({
                "name": "ibm_kyoto", "status": "ACTIVE", "qubit_count": 127, "queue_depth": 2
            })])
        }

        async fn fetch_jobs(&self, limit: u32) -> Result<Vec<Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(limit, 5000);
            if self.fail_jobs {
                return Err(FetchError::Http {
                    endpoint: "/jobs".to_string(),
                    status: 500,
                });
            }
            Ok(vec![json!({
                "id": "j1",
                "status": "queued",
                "backend": "ibm_kyoto",
                "submitted": "2024-06-01T11:59:30Z",
                "status_history": [{"status": "QUEUED", "timestamp": "2024-06-01T11:59:30Z"}]
            })])
        }
    }

    fn orchestrator(fail_jobs: bool) -> (DataSourceOrchestrator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let generator = SyntheticFleetGenerator::new(&SyntheticConfig {
            job_count: 200,
            seed: Some(3),
            ..SyntheticConfig::default()
        });
        let orchestrator = DataSourceOrchestrator::new(
            Arc::new(StubClient {
                fail_jobs,
                calls: AtomicU32::new(0),
            }),
            Arc::new(generator),
            AggregationPipeline::default(),
            Duration::seconds(60),
            clock.clone(),
            5000,
        );
        (orchestrator, clock)
    }

    #[tokio::test]
    async fn synthetic_reports_are_cached_for_the_ttl() {
        let (orchestrator, clock) = orchestrator(false);

        let first = orchestrator.dashboard(DataMode::Synthetic, false).await;
        assert_eq!(first.source, DataSource::Mock);

        clock.advance(Duration::seconds(59));
        let second = orchestrator.dashboard(DataMode::Synthetic, false).await;
        assert_eq!(second.source, DataSource::MockCached);
        assert_eq!(second.report, first.report);

        clock.advance(Duration::seconds(1));
        assert!(!orchestrator.synthetic_cache_is_warm().await);
        let third = orchestrator.dashboard(DataMode::Synthetic, false).await;
        assert_eq!(third.source, DataSource::Mock);
        assert!(orchestrator.synthetic_cache_is_warm().await);
    }

    #[tokio::test]
    async fn force_bypasses_the_cache() {
        let (orchestrator, _clock) = orchestrator(false);
        orchestrator.dashboard(DataMode::Synthetic, false).await;

        let forced = orchestrator.dashboard(DataMode::Synthetic, true).await;
        assert_eq!(forced.source, DataSource::Mock);
    }

    #[tokio::test]
    async fn live_success_is_labelled_real() {
        let (orchestrator, _clock) = orchestrator(false);
        let response = orchestrator.dashboard(DataMode::Live, false).await;

        assert_eq!(response.source, DataSource::Real);
        assert_eq!(response.note, None);
        assert_eq!(response.report.metrics.total_jobs, 1);
        assert_eq!(response.report.metrics.avg_wait_time, 30.0);
        assert_eq!(response.report.metrics.open_sessions, 1);
        assert!(response.report.metrics.api_speed.is_some());
        assert_eq!(response.report.backends[0].name, "ibm_kyoto");
    }

    #[tokio::test]
    async fn live_failure_falls_back_with_note() {
        let (orchestrator, _clock) = orchestrator(true);
        let response = orchestrator.dashboard(DataMode::Live, false).await;

        assert_ne!(response.source, DataSource::Real);
        assert_eq!(response.note.as_deref(), Some(FALLBACK_NOTE));
        assert_eq!(response.report.backends.len(), 6);
        assert_eq!(response.report.chart_data.len(), 12);
        assert_eq!(response.report.periodic_report_data.weekly.len(), 4);
    }
}
