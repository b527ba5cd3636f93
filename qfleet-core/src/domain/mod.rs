//! Canonical fleet domain model

pub mod backend;
pub mod errors;
pub mod job;
pub mod metrics;

pub use backend::{Backend, BackendStatus};
pub use errors::ValidationError;
pub use job::{Job, JobStatus, StatusHistoryEntry, parse_timestamp};
pub use metrics::Metrics;
