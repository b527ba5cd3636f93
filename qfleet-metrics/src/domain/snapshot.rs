//! Fetched fleet state and the report derived from it

use qfleet_core::domain::{Backend, Job, Metrics};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::reports::{ChartPoint, DailySummary, PeriodicReport};

/// Source-side measurements that do not come from the records themselves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceTelemetry {
    pub open_sessions: u32,
    pub api_speed_ms: Option<u64>,
}

/// Normalized backends and jobs from one fetch cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    pub backends: Vec<Backend>,
    pub jobs: Vec<Job>,
    pub telemetry: SourceTelemetry,
}

/// Everything the dashboard needs, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    /// Most recent jobs inside the aggregation window
    pub jobs: Vec<Job>,
    pub backends: Vec<Backend>,
    pub metrics: Metrics,
    pub chart_data: Vec<ChartPoint>,
    pub daily_summary: DailySummary,
    pub periodic_report_data: PeriodicReport,
}
