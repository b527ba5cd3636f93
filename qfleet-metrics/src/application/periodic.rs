//! Weekly and monthly status trends

use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, Utc};
use qfleet_core::domain::Job;

use super::calendar::{local_date, midnight_utc, month_start, week_start};
use crate::domain::{PeriodicPoint, PeriodicReport, StatusCounts};

pub const WEEKS: u32 = 4;
pub const MONTHS: u32 = 6;

/// Half-open UTC range with its chart label
struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    label: String,
}

fn weekly_periods(today: NaiveDate, offset: FixedOffset) -> Vec<Period> {
    let current = week_start(today);
    (0..WEEKS)
        .rev()
        .map(|back| {
            let monday = current - Duration::weeks(i64::from(back));
            Period {
                start: midnight_utc(monday, offset),
                end: midnight_utc(monday + Duration::weeks(1), offset),
                label: monday.format("%b %-d").to_string(),
            }
        })
        .collect()
}

fn monthly_periods(today: NaiveDate, offset: FixedOffset) -> Vec<Period> {
    (0..MONTHS)
        .rev()
        .map(|back| {
            let first = month_start(today, back);
            let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
            Period {
                start: midnight_utc(first, offset),
                end: midnight_utc(next, offset),
                label: first.format("%b").to_string(),
            }
        })
        .collect()
}

/// Count `jobs` into the given disjoint, ascending periods
fn tally<'a>(jobs: impl IntoIterator<Item = &'a Job>, periods: &[Period]) -> Vec<PeriodicPoint> {
    let mut counts = vec![StatusCounts::default(); periods.len()];

    for job in jobs {
        let slot = periods.partition_point(|period| period.end <= job.submitted);
        let inside = periods
            .get(slot)
            .is_some_and(|period| job.submitted >= period.start);
        if inside {
            counts[slot].record(job.status);
        }
    }

    periods
        .iter()
        .zip(counts)
        .map(|(period, counts)| PeriodicPoint {
            date: period.label.clone(),
            counts,
        })
        .collect()
}

/// Trend series over the full job set: the four ISO weeks (Monday start)
/// ending with the current week, and the six calendar months ending with the
/// current month. Both are always fully populated, oldest first.
pub fn periodic_trends(jobs: &[Job], now: DateTime<Utc>, offset: FixedOffset) -> PeriodicReport {
    let today = local_date(now, offset);

    PeriodicReport {
        weekly: tally(jobs, &weekly_periods(today, offset)),
        monthly: tally(jobs, &monthly_periods(today, offset)),
    }
}
