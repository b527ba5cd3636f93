//! Orchestration domain types

use qfleet_metrics::FleetReport;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provenance of a dashboard payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DataSource {
    /// Freshly generated synthetic data
    #[serde(rename = "mock")]
    Mock,
    /// Live fleet API
    #[serde(rename = "real")]
    Real,
    /// Synthetic data served from the snapshot cache
    #[serde(rename = "mock (cached)")]
    MockCached,
}

impl DataSource {
    /// Label as it appears in the `source` field of the payload
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Mock => "mock",
            DataSource::Real => "real",
            DataSource::MockCached => "mock (cached)",
        }
    }
}

/// Which source a refresh should read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataMode {
    Live,
    Synthetic,
}

impl DataMode {
    pub fn from_demo_flag(demo: bool) -> Self {
        if demo { DataMode::Synthetic } else { DataMode::Live }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Live => "live",
            DataMode::Synthetic => "synthetic",
        }
    }
}

/// A refresh issued by one logical caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub mode: DataMode,
    /// Skip both the snapshot cache and request coalescing
    pub force: bool,
    pub session: String,
}

impl RefreshRequest {
    pub fn new(mode: DataMode, session: impl Into<String>) -> Self {
        Self {
            mode,
            force: false,
            session: session.into(),
        }
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Report plus provenance, as served by `GET /api/metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub report: FleetReport,
    pub source: DataSource,
    /// Advisory set when the live source failed and synthetic data was served instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
