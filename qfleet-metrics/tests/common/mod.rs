//! Shared helpers for the aggregation integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use qfleet_core::domain::{Job, JobStatus, StatusHistoryEntry};
use std::collections::BTreeMap;

/// Factory for jobs with a consistent lifecycle
pub struct JobFactory;

impl JobFactory {
    /// Job still waiting in the queue
    pub fn queued(id: &str, submitted: DateTime<Utc>) -> Job {
        Self::build(id, JobStatus::Queued, submitted, None, None)
    }

    /// Job that started `wait` after submission and is still running
    pub fn running(id: &str, submitted: DateTime<Utc>, wait: Duration) -> Job {
        Self::build(id, JobStatus::Running, submitted, Some(wait), None)
    }

    /// Job that waited `wait`, ran for `run` and ended in `status`
    pub fn finished(
        id: &str,
        status: JobStatus,
        submitted: DateTime<Utc>,
        wait: Duration,
        run: Duration,
    ) -> Job {
        Self::build(id, status, submitted, Some(wait), Some(run))
    }

    fn build(
        id: &str,
        status: JobStatus,
        submitted: DateTime<Utc>,
        wait: Option<Duration>,
        run: Option<Duration>,
    ) -> Job {
        let mut history = vec![StatusHistoryEntry::new(JobStatus::Queued, submitted)];
        let mut elapsed = 0.0;
        if let Some(wait) = wait {
            let started = submitted + wait;
            history.push(StatusHistoryEntry::new(JobStatus::Running, started));
            if let Some(run) = run {
                history.push(StatusHistoryEntry::new(status, started + run));
                elapsed = run.num_seconds() as f64;
            }
        }

        Job {
            id: id.to_string(),
            status,
            backend: "ibm_kyoto".to_string(),
            submitted,
            elapsed_time: elapsed,
            user: "Eve".to_string(),
            qpu_seconds: 0.0,
            logs: String::new(),
            results: BTreeMap::new(),
            status_history: history,
        }
    }
}
