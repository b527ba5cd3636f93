//! Live fleet API access

pub mod circuit_breaker_wrapper;
pub mod live_client;

pub use circuit_breaker_wrapper::CircuitBreakerFleetClient;
pub use live_client::{FetchError, FleetApiClient, HttpFleetApiClient, RawFleet};
