//! Shared helpers for the application tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use qfleet_telemetry::Config;
use serde_json::Value;
use tower::ServiceExt;

/// Seeded, small configuration whose live source is never reachable
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.live.base_url = "http://127.0.0.1:9/api".to_string();
    config.live.timeout_seconds = 1;
    config.synthetic.job_count = 200;
    config.synthetic.seed = Some(7);
    config.server.enable_docs = false;
    config
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
