//! Aggregated report shapes

use chrono::{DateTime, FixedOffset};
use qfleet_core::domain::JobStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-status job counts for a chart or trend point.
///
/// Only the four charted statuses are tracked; CANCELLED and UNKNOWN jobs are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    #[serde(rename = "COMPLETED")]
    pub completed: u32,
    #[serde(rename = "RUNNING")]
    pub running: u32,
    #[serde(rename = "QUEUED")]
    pub queued: u32,
    #[serde(rename = "ERROR")]
    pub error: u32,
}

impl StatusCounts {
    /// Count one job; returns whether the status is charted
    pub fn record(&mut self, status: JobStatus) -> bool {
        let slot = match status {
            JobStatus::Completed => &mut self.completed,
            JobStatus::Running => &mut self.running,
            JobStatus::Queued => &mut self.queued,
            JobStatus::Error => &mut self.error,
            JobStatus::Cancelled | JobStatus::Unknown => return false,
        };
        *slot += 1;
        true
    }

    pub fn total(&self) -> u32 {
        self.completed + self.running + self.queued + self.error
    }
}

/// One bucket of the status histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    /// Bucket start as `HH:MM`
    #[schema(example = "14:00")]
    pub time: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// COMPLETED jobs submitted on one backend today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BackendCompletion {
    pub name: String,
    pub value: u32,
    /// Chart palette slot, cycling over five colours
    #[schema(example = "hsl(var(--chart-1))")]
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Start of the current calendar day
    #[schema(value_type = String)]
    pub date: DateTime<FixedOffset>,
    pub total_completed: u32,
    pub completed_by_backend: Vec<BackendCompletion>,
}

/// One week or month of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeriodicPoint {
    #[schema(example = "Jun 3")]
    pub date: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeriodicReport {
    pub weekly: Vec<PeriodicPoint>,
    pub monthly: Vec<PeriodicPoint>,
}
