//! Route definitions and server setup

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware,
    routing::get,
};
use qfleet_core::Config;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::presentation::{
    controllers::{OrchestratorState, SESSION_HEADER, get_connectivity, get_metrics, health_check},
    middleware::logging_middleware,
    models::{ErrorResponse, HealthResponse},
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::get_metrics,
        crate::presentation::controllers::get_connectivity,
        crate::presentation::controllers::health_check
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            crate::domain::DashboardResponse,
            crate::domain::DataSource,
            qfleet_metrics::FleetReport,
            qfleet_metrics::domain::ChartPoint,
            qfleet_metrics::domain::StatusCounts,
            qfleet_metrics::domain::DailySummary,
            qfleet_metrics::domain::BackendCompletion,
            qfleet_metrics::domain::PeriodicReport,
            qfleet_metrics::domain::PeriodicPoint,
            qfleet_metrics::domain::ConnectivityGraph,
            qfleet_metrics::domain::QubitNode,
            qfleet_metrics::domain::QubitLink,
            qfleet_metrics::domain::QubitGroup,
            qfleet_core::domain::Job,
            qfleet_core::domain::JobStatus,
            qfleet_core::domain::StatusHistoryEntry,
            qfleet_core::domain::Backend,
            qfleet_core::domain::BackendStatus,
            qfleet_core::domain::Metrics
        )
    ),
    tags(
        (name = "metrics", description = "Aggregated fleet telemetry for the dashboard"),
        (name = "backends", description = "Per-backend simulated topology"),
        (name = "health", description = "Service health monitoring")
    ),
    info(
        title = "QFleet Telemetry API",
        version = "1.0.0",
        description = "Operational telemetry for a fleet of quantum-computing backends: job queues, wait times, status histograms and trends, served from the live fleet API or a synthetic generator."
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    )
)]
pub struct ApiDoc;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = if allowed_origins.len() == 1 && allowed_origins[0] == "*" {
        CorsLayer::new().allow_origin(AllowOrigin::mirror_request())
    } else {
        let mut layer = CorsLayer::new();
        for origin in allowed_origins {
            match axum::http::HeaderValue::from_str(origin) {
                Ok(origin_header) => {
                    layer = layer.allow_origin(origin_header);
                }
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                }
            }
        }
        layer
    };

    layer
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::USER_AGENT,
            header::ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderName::from_static(SESSION_HEADER),
        ])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}

/// Create the application router with its middleware stack
pub fn create_router(state: OrchestratorState, config: &Config) -> Router {
    let api_routes = Router::new()
        .route("/metrics", get(get_metrics))
        .route("/backends/{name}/connectivity", get(get_connectivity));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check));

    // Docs stay off unless configured
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder).with_state(state)
}
