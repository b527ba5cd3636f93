//! Trailing time window selection

use chrono::{DateTime, Duration, Utc};
use qfleet_core::domain::Job;

/// Jobs submitted strictly after `now - horizon`, in input order
pub fn select_recent<'a>(jobs: &'a [Job], now: DateTime<Utc>, horizon: Duration) -> Vec<&'a Job> {
    let cutoff = now - horizon;
    jobs.iter().filter(|job| job.submitted > cutoff).collect()
}
