//! QFleet Core - Foundation crate for the quantum fleet telemetry service
//!
//! This crate provides shared functionality used across the QFleet crates:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with file and environment variable support
//! - [`domain`] - Job, backend and metrics models plus record validation errors
//! - [`infrastructure`] - Clock abstraction, snapshot cache and circuit breaker
//! - [`logging`] - Structured logging with tracing
//!
//! # Configuration
//!
//! Load configuration from files and environment:
//!
//! ```rust,ignore
//! use qfleet_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `QFLEET__` prefix with double underscore separators:
//!
//! ```bash
//! QFLEET__SERVER__PORT=3000
//! QFLEET__SYNTHETIC__CACHE_TTL_SECONDS=60
//! ```
//!
//! `BACKEND_API_URL` overrides the live source base URL.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
