//! Per-backend completion summary for the current day

use chrono::{DateTime, Duration, FixedOffset, Utc};
use qfleet_core::domain::{Job, JobStatus};

use super::calendar::{local_date, midnight_local, midnight_utc};
use crate::domain::{BackendCompletion, DailySummary};

const PALETTE_SIZE: usize = 5;

fn palette_fill(index: usize) -> String {
    format!("hsl(var(--chart-{}))", index % PALETTE_SIZE + 1)
}

/// Count COMPLETED jobs submitted during the calendar day containing `now`.
///
/// Backends appear in the order their first completion is encountered.
pub fn daily_summary<'a, I>(jobs: I, now: DateTime<Utc>, offset: FixedOffset) -> DailySummary
where
    I: IntoIterator<Item = &'a Job>,
{
    let today = local_date(now, offset);
    let day_start = midnight_utc(today, offset);
    let day_end = day_start + Duration::days(1);

    let mut by_backend: Vec<(&str, u32)> = Vec::new();
    let mut total_completed = 0;

    for job in jobs {
        if job.status != JobStatus::Completed
            || job.submitted < day_start
            || job.submitted >= day_end
        {
            continue;
        }
        total_completed += 1;
        match by_backend.iter_mut().find(|(name, _)| *name == job.backend) {
            Some((_, count)) => *count += 1,
            None => by_backend.push((job.backend.as_str(), 1)),
        }
    }

    DailySummary {
        date: midnight_local(today, offset),
        total_completed,
        completed_by_backend: by_backend
            .into_iter()
            .enumerate()
            .map(|(i, (name, value))| BackendCompletion {
                name: name.to_string(),
                value,
                fill: palette_fill(i),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{job_at, on_backend};
    use chrono::{Offset, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_has_no_completions() {
        let summary = daily_summary(std::iter::empty(), now(), Utc.fix());
        assert_eq!(summary.total_completed, 0);
        assert!(summary.completed_by_backend.is_empty());
        assert_eq!(summary.date.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn groups_todays_completions_in_first_seen_order() {
        let morning = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
        let jobs = vec![
            on_backend(job_at("1", JobStatus::Completed, morning), "ibm_kyoto"),
            on_backend(job_at("2", JobStatus::Completed, morning), "ibm_osaka"),
            on_backend(job_at("3", JobStatus::Completed, morning), "ibm_kyoto"),
            on_backend(job_at("4", JobStatus::Error, morning), "ibmq_mumbai"),
            on_backend(
                job_at("5", JobStatus::Completed, morning - Duration::hours(2)),
                "ibmq_mumbai",
            ),
        ];

        let summary = daily_summary(&jobs, now(), Utc.fix());
        assert_eq!(summary.total_completed, 3);
        assert_eq!(
            summary.completed_by_backend,
            vec![
                BackendCompletion {
                    name: "ibm_kyoto".to_string(),
                    value: 2,
                    fill: "hsl(var(--chart-1))".to_string(),
                },
                BackendCompletion {
                    name: "ibm_osaka".to_string(),
                    value: 1,
                    fill: "hsl(var(--chart-2))".to_string(),
                },
            ]
        );
    }

    #[test]
    fn palette_wraps_after_five() {
        assert_eq!(palette_fill(4), "hsl(var(--chart-5))");
        assert_eq!(palette_fill(5), "hsl(var(--chart-1))");
    }

    #[test]
    fn day_boundary_follows_offset() {
        // 23:30 UTC on May 31 is already June 1 at +02:00
        let late = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap();
        let jobs = vec![job_at("late", JobStatus::Completed, late)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(daily_summary(&jobs, now(), plus_two).total_completed, 1);
        assert_eq!(daily_summary(&jobs, now(), Utc.fix()).total_completed, 0);
    }
}
