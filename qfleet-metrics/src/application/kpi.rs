//! Headline KPIs over the aggregation window

use chrono::{DateTime, Utc};
use qfleet_core::domain::{Job, JobStatus, Metrics};

use super::wait_time::average_wait_seconds;
use crate::domain::SourceTelemetry;

/// COMPLETED / (COMPLETED + ERROR) as a percentage, 0 when neither occurred
pub fn success_rate(completed: usize, errored: usize) -> f64 {
    let finished = completed + errored;
    if finished == 0 {
        return 0.0;
    }
    completed as f64 / finished as f64 * 100.0
}

/// KPIs over the window-filtered jobs
pub fn compute_metrics(window: &[&Job], now: DateTime<Utc>, telemetry: SourceTelemetry) -> Metrics {
    let count = |status: JobStatus| window.iter().filter(|job| job.status == status).count();
    let completed = count(JobStatus::Completed);
    let errored = count(JobStatus::Error);

    Metrics {
        total_jobs: window.len(),
        live_jobs: window.iter().filter(|job| job.status.is_live()).count(),
        avg_wait_time: average_wait_seconds(window.iter().copied(), now),
        success_rate: success_rate(completed, errored),
        open_sessions: telemetry.open_sessions,
        api_speed: telemetry.api_speed_ms,
    }
}
