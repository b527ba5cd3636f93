//! HTTP surface: controllers, models, middleware and routes

pub mod controllers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use controllers::OrchestratorState;
pub use routes::{ApiDoc, create_router};
