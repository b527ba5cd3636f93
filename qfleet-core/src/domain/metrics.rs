//! Fleet-level KPI record

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline numbers for the current aggregation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Metrics {
    pub total_jobs: usize,
    /// RUNNING plus QUEUED jobs inside the window
    pub live_jobs: usize,
    /// Mean QUEUED -> RUNNING wait in seconds
    pub avg_wait_time: f64,
    /// COMPLETED / (COMPLETED + ERROR) as a percentage in [0, 100]
    pub success_rate: f64,
    pub open_sessions: u32,
    /// Upstream round-trip latency in milliseconds, when measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_speed: Option<u64>,
}
