//! Orchestration use cases

pub mod orchestrator;
pub mod refresh;

pub use orchestrator::{DataSourceOrchestrator, FALLBACK_NOTE};
pub use refresh::{ANONYMOUS_SESSION, RefreshCoordinator};
