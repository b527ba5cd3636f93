//! Aggregation use cases

pub mod calendar;
pub mod daily;
pub mod histogram;
pub mod kpi;
pub mod normalizer;
pub mod periodic;
pub mod pipeline;
pub mod wait_time;
pub mod window;

pub use daily::daily_summary;
pub use histogram::{BucketSpec, bucketize};
pub use kpi::{compute_metrics, success_rate};
pub use normalizer::{Normalized, normalize_backend, normalize_backends, normalize_job, normalize_jobs};
pub use periodic::periodic_trends;
pub use pipeline::AggregationPipeline;
pub use wait_time::average_wait_seconds;
pub use window::select_recent;
