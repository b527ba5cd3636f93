//! Average queueing latency

use chrono::{DateTime, Utc};
use qfleet_core::domain::Job;

/// Mean wait in seconds between a job's first QUEUED entry and its first
/// RUNNING entry, or `now` when it has not started yet.
///
/// Jobs without a QUEUED entry are ignored. Negative intervals from malformed
/// histories count as zero. Returns 0 when no job qualifies.
pub fn average_wait_seconds<'a, I>(jobs: I, now: DateTime<Utc>) -> f64
where
    I: IntoIterator<Item = &'a Job>,
{
    let (total_ms, waiting) = jobs
        .into_iter()
        .filter_map(|job| {
            let queued = job.queued_at()?;
            let until = job.started_at().unwrap_or(now);
            Some((until - queued).num_milliseconds().max(0))
        })
        .fold((0i64, 0u32), |(total, count), wait| (total + wait, count + 1));

    if waiting == 0 {
        return 0.0;
    }
    total_ms as f64 / f64::from(waiting) / 1000.0
}
