//! Shared aggregation pipeline for every data source

use chrono::{DateTime, Duration, FixedOffset, Utc};
use qfleet_core::config::AggregationConfig;
use qfleet_core::domain::Job;

use super::daily::daily_summary;
use super::histogram::{BucketSpec, bucketize};
use super::kpi::compute_metrics;
use super::periodic::periodic_trends;
use super::window::select_recent;
use crate::domain::{FleetReport, FleetSnapshot};

/// Derives a [`FleetReport`] from a snapshot.
///
/// KPIs, the histogram and the returned job list use the trailing window;
/// the daily summary and trend series use the full job set.
#[derive(Debug, Clone)]
pub struct AggregationPipeline {
    window: Duration,
    buckets: BucketSpec,
    offset: FixedOffset,
    max_jobs_returned: usize,
}

impl AggregationPipeline {
    pub fn new(config: &AggregationConfig) -> Self {
        let offset = config.utc_offset();
        Self {
            window: Duration::hours(i64::from(config.window_hours)),
            buckets: BucketSpec {
                count: config.bucket_count,
                width: Duration::minutes(i64::from(config.bucket_width_minutes)),
                offset,
            },
            offset,
            max_jobs_returned: config.max_jobs_returned,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    #[tracing::instrument(skip_all, fields(jobs = snapshot.jobs.len(), backends = snapshot.backends.len()))]
    pub fn run(&self, snapshot: &FleetSnapshot, now: DateTime<Utc>) -> FleetReport {
        let window = select_recent(&snapshot.jobs, now, self.window);

        let metrics = compute_metrics(&window, now, snapshot.telemetry);
        let chart_data = bucketize(window.iter().copied(), now, self.buckets);
        let daily_summary = daily_summary(&snapshot.jobs, now, self.offset);
        let periodic_report_data = periodic_trends(&snapshot.jobs, now, self.offset);

        let mut recent: Vec<&Job> = window;
        recent.sort_by(|a, b| b.submitted.cmp(&a.submitted));
        let jobs = recent
            .into_iter()
            .take(self.max_jobs_returned)
            .cloned()
            .collect();

        tracing::debug!(
            total_jobs = metrics.total_jobs,
            live_jobs = metrics.live_jobs,
            "Aggregated fleet snapshot"
        );

        FleetReport {
            jobs,
            backends: snapshot.backends.clone(),
            metrics,
            chart_data,
            daily_summary,
            periodic_report_data,
        }
    }
}

impl Default for AggregationPipeline {
    fn default() -> Self {
        Self::new(&AggregationConfig::default())
    }
}
