//! End-to-end tests for the assembled application

mod common;

use axum::http::StatusCode;
use common::{get_json, test_config};
use qfleet_telemetry::create_app;
use std::time::Duration;

#[tokio::test]
async fn app_serves_demo_metrics_and_health() {
    let mut config = test_config();
    config.refresh.enabled = false;

    let app = create_app(config).await.unwrap();

    let (status, metrics) = get_json(&app.router, "/api/metrics?demo=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["source"], "mock");
    assert_eq!(metrics["periodicReportData"]["weekly"].as_array().unwrap().len(), 4);
    assert_eq!(metrics["periodicReportData"]["monthly"].as_array().unwrap().len(), 6);

    let (status, health) = get_json(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn refresh_worker_warms_the_synthetic_cache() {
    let mut config = test_config();
    config.refresh.enabled = true;
    config.refresh.demo = true;
    config.refresh.interval_seconds = 1;

    let app = create_app(config).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let (_, metrics) = get_json(&app.router, "/api/metrics?demo=true").await;
    assert_eq!(metrics["source"], "mock (cached)");

    app.shutdown_token.cancel();
}

#[tokio::test]
async fn cancelled_worker_leaves_the_cache_cold() {
    let mut config = test_config();
    config.refresh.enabled = true;
    config.refresh.interval_seconds = 1;

    let app = create_app(config).await.unwrap();
    app.shutdown_token.cancel();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let (_, metrics) = get_json(&app.router, "/api/metrics?demo=true").await;
    assert_eq!(metrics["source"], "mock");
}

#[tokio::test]
async fn docs_are_served_when_enabled() {
    let mut config = test_config();
    config.refresh.enabled = false;
    config.server.enable_docs = true;

    let app = create_app(config).await.unwrap();
    let (status, spec) = get_json(&app.router, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(spec["info"]["title"], "QFleet Telemetry API");
    assert!(spec["paths"]["/api/backends/{name}/connectivity"].is_object());
}
