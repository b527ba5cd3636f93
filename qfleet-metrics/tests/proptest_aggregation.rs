//! Property-based tests for the aggregators

mod common;

use chrono::{DateTime, Duration, Offset, TimeZone, Utc};
use common::JobFactory;
use proptest::prelude::*;
use qfleet_core::domain::{Job, JobStatus};
use qfleet_metrics::application::{
    BucketSpec, average_wait_seconds, bucketize, daily_summary, periodic_trends,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = JobStatus> {
    prop::sample::select(JobStatus::ALL.to_vec())
}

/// Jobs submitted up to 200 days in the past (and slightly in the future),
/// some without any history
fn jobs_strategy() -> impl Strategy<Value = Vec<Job>> {
    prop::collection::vec(
        (
            status_strategy(),
            -3_600i64..200 * 86_400,
            0i64..7_200,
            any::<bool>(),
        ),
        0..200,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (status, age, wait, has_history))| {
                let submitted = now() - Duration::seconds(age);
                let mut job = match status {
                    JobStatus::Queued => JobFactory::queued(&i.to_string(), submitted),
                    JobStatus::Running => {
                        JobFactory::running(&i.to_string(), submitted, Duration::seconds(wait))
                    }
                    other => JobFactory::finished(
                        &i.to_string(),
                        other,
                        submitted,
                        Duration::seconds(wait),
                        Duration::seconds(60),
                    ),
                };
                if !has_history {
                    job.status_history.clear();
                }
                job
            })
            .collect()
    })
}

fn hourly() -> BucketSpec {
    BucketSpec {
        count: 12,
        width: Duration::hours(1),
        offset: Utc.fix(),
    }
}

proptest! {
    #[test]
    fn test_average_wait_is_never_negative(jobs in jobs_strategy()) {
        let wait = average_wait_seconds(&jobs, now());
        prop_assert!(wait >= 0.0);

        let any_queued = jobs.iter().any(|job| job.queued_at().is_some());
        if !any_queued {
            prop_assert_eq!(wait, 0.0);
        }
    }

    #[test]
    fn test_histogram_counts_each_job_at_most_once(jobs in jobs_strategy()) {
        let points = bucketize(&jobs, now(), hourly());
        prop_assert_eq!(points.len(), 12);

        let start = now() - Duration::hours(12);
        let in_range: Vec<&Job> = jobs
            .iter()
            .filter(|job| job.submitted >= start && job.submitted < now())
            .collect();
        let charted = in_range
            .iter()
            .filter(|job| matches!(
                job.status,
                JobStatus::Completed | JobStatus::Running | JobStatus::Queued | JobStatus::Error
            ))
            .count();

        let total: u32 = points.iter().map(|p| p.counts.total()).sum();
        prop_assert!(total as usize <= in_range.len());
        prop_assert_eq!(total as usize, charted);
    }

    #[test]
    fn test_daily_total_matches_completed_today(jobs in jobs_strategy()) {
        let summary = daily_summary(&jobs, now(), Utc.fix());
        let today = now().date_naive();
        let expected = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Completed && job.submitted.date_naive() == today)
            .count();

        prop_assert_eq!(summary.total_completed as usize, expected);
        let by_backend: u32 = summary.completed_by_backend.iter().map(|b| b.value).sum();
        prop_assert_eq!(by_backend, summary.total_completed);
    }

    #[test]
    fn test_trend_series_have_fixed_length(jobs in jobs_strategy(), offset_hours in -12i32..=12) {
        let offset = chrono::FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let report = periodic_trends(&jobs, now(), offset);
        prop_assert_eq!(report.weekly.len(), 4);
        prop_assert_eq!(report.monthly.len(), 6);

        let weekly_total: u32 = report.weekly.iter().map(|p| p.counts.total()).sum();
        prop_assert!(weekly_total as usize <= jobs.len());
    }
}
