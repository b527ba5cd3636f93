//! QFleet Telemetry - Main application library
//!
//! Wires the aggregation engine and the data source orchestrator into the HTTP server.

mod app;

pub use app::{AppHandle, REFRESH_WORKER_SESSION, build_state, create_app};
pub use qfleet_core::{Config, init_tracing};
pub use qfleet_orchestrator::OrchestratorState;

pub use qfleet_core;
pub use qfleet_metrics;
pub use qfleet_orchestrator;
