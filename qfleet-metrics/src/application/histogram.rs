//! Fixed-width status histogram over the trailing hours

use chrono::{DateTime, Duration, FixedOffset, Utc};
use qfleet_core::domain::Job;

use crate::domain::{ChartPoint, StatusCounts};

/// Layout of the histogram buckets
#[derive(Debug, Clone, Copy)]
pub struct BucketSpec {
    pub count: u32,
    pub width: Duration,
    /// Offset used for the `HH:MM` labels
    pub offset: FixedOffset,
}

/// Count jobs by status into `count` contiguous half-open buckets covering
/// `[now - count * width, now)`, oldest first.
///
/// Each bucket is labelled with its start time. Jobs submitted outside the
/// covered range are dropped. Runs in a single pass over `jobs`.
pub fn bucketize<'a, I>(jobs: I, now: DateTime<Utc>, spec: BucketSpec) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a Job>,
{
    let width_ms = spec.width.num_milliseconds().max(1);
    let start = now - Duration::milliseconds(width_ms * i64::from(spec.count));
    let mut counts = vec![StatusCounts::default(); spec.count as usize];

    for job in jobs {
        if job.submitted < start || job.submitted >= now {
            continue;
        }
        let index = ((job.submitted - start).num_milliseconds() / width_ms) as usize;
        if let Some(bucket) = counts.get_mut(index) {
            bucket.record(job.status);
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, counts)| {
            let bucket_start = start + Duration::milliseconds(width_ms * i as i64);
            ChartPoint {
                time: bucket_start
                    .with_timezone(&spec.offset)
                    .format("%H:%M")
                    .to_string(),
                counts,
            }
        })
        .collect()
}
