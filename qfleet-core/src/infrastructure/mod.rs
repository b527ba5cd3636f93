//! Infrastructure shared by the aggregation and orchestration crates

pub mod cache;
pub mod clock;
pub mod resilience;

pub use cache::SnapshotCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitRejection, CircuitState};
