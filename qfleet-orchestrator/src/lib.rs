//! QFleet Orchestrator - Data source selection and the dashboard HTTP API
//!
//! # Modules
//!
//! - [`domain`] - Data modes, source labels and the dashboard envelope
//! - [`application`] - Live/synthetic orchestration with caching and fallback,
//!   per-session refresh coalescing
//! - [`infrastructure`] - Live fleet API client and its circuit breaker
//! - [`presentation`] - axum controllers, models and routes
//!
//! A live request never fails outright: when the fleet API is unreachable the
//! orchestrator serves synthetic data with an explanatory note.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::{DataSourceOrchestrator, RefreshCoordinator};
pub use presentation::{OrchestratorState, create_router};
