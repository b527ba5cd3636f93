//! QFleet Metrics - Aggregation engine for quantum fleet telemetry
//!
//! Turns a fetched snapshot of jobs and backends into dashboard-ready reports.
//!
//! # Modules
//!
//! - [`domain`] - Report, snapshot and connectivity types
//! - [`application`] - Normalizer, window selection, wait-time estimation,
//!   status histogram, daily summary, periodic trends and the pipeline that
//!   combines them
//! - [`infrastructure`] - Synthetic fleet and connectivity generators
//!
//! Every aggregator is a pure function of its inputs and an explicit `now`.
//!
//! ```rust,ignore
//! use qfleet_metrics::application::AggregationPipeline;
//!
//! let pipeline = AggregationPipeline::new(&config.aggregation);
//! let report = pipeline.run(&snapshot, clock.now());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::AggregationPipeline;
pub use domain::{FleetReport, FleetSnapshot};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};
    use qfleet_core::domain::{Job, JobStatus, StatusHistoryEntry};
    use std::collections::BTreeMap;

    /// Job with an empty history
    pub fn job_at(id: &str, status: JobStatus, submitted: DateTime<Utc>) -> Job {
        Job {
            id: id.to_string(),
            status,
            backend: "ibm_brisbane".to_string(),
            submitted,
            elapsed_time: 0.0,
            user: "Alice".to_string(),
            qpu_seconds: 0.0,
            logs: String::new(),
            results: BTreeMap::new(),
            status_history: Vec::new(),
        }
    }

    pub fn with_history(mut job: Job, history: &[(JobStatus, DateTime<Utc>)]) -> Job {
        job.status_history = history
            .iter()
            .map(|(status, at)| StatusHistoryEntry::new(*status, *at))
            .collect();
        job
    }

    pub fn on_backend(mut job: Job, backend: &str) -> Job {
        job.backend = backend.to_string();
        job
    }
}
