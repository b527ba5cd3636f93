//! Job entity and lifecycle status

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::ValidationError;

/// Current lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Completed,
    Running,
    Queued,
    Error,
    Cancelled,
    Unknown,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Completed,
        JobStatus::Running,
        JobStatus::Queued,
        JobStatus::Error,
        JobStatus::Cancelled,
        JobStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Completed => "COMPLETED",
            JobStatus::Running => "RUNNING",
            JobStatus::Queued => "QUEUED",
            JobStatus::Error => "ERROR",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// Waiting for or occupying a backend
    pub fn is_live(&self) -> bool {
        matches!(self, JobStatus::Running | JobStatus::Queued)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Error | JobStatus::Cancelled
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    /// Case-insensitive; sources are not consistent about casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| ValidationError::InvalidJobStatus(s.to_string()))
    }
}

/// One transition in a job's status history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusHistoryEntry {
    pub status: JobStatus,
    pub timestamp: DateTime<Utc>,
}

impl StatusHistoryEntry {
    pub fn new(status: JobStatus, timestamp: DateTime<Utc>) -> Self {
        Self { status, timestamp }
    }
}

/// A unit of work submitted to a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    #[schema(example = "cx81k2j0aq17")]
    pub id: String,
    pub status: JobStatus,
    #[schema(example = "ibm_brisbane")]
    pub backend: String,
    pub submitted: DateTime<Utc>,
    /// Seconds spent running
    pub elapsed_time: f64,
    pub user: String,
    pub qpu_seconds: f64,
    #[serde(default)]
    pub logs: String,
    /// Measurement outcome counts, empty unless the job completed
    #[serde(default)]
    pub results: BTreeMap<String, u64>,
    pub status_history: Vec<StatusHistoryEntry>,
}

impl Job {
    /// First history entry with the given status
    pub fn first_entry(&self, status: JobStatus) -> Option<&StatusHistoryEntry> {
        self.status_history
            .iter()
            .find(|entry| entry.status == status)
    }

    pub fn queued_at(&self) -> Option<DateTime<Utc>> {
        self.first_entry(JobStatus::Queued).map(|e| e.timestamp)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.first_entry(JobStatus::Running).map(|e| e.timestamp)
    }

    /// Whether the history obeys the lifecycle invariants: starts with QUEUED,
    /// timestamps never go backwards, and the last entry matches `status`.
    ///
    /// UNKNOWN jobs are exempt from the last-entry rule.
    pub fn history_is_consistent(&self) -> bool {
        let Some(first) = self.status_history.first() else {
            return self.status == JobStatus::Unknown;
        };
        if first.status != JobStatus::Queued {
            return false;
        }

        let ordered = self
            .status_history
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp);

        let last_matches = self.status == JobStatus::Unknown
            || self
                .status_history
                .last()
                .is_some_and(|last| last.status == self.status);

        ordered && last_matches
    }
}

/// Parse an ISO-8601 timestamp. Naive timestamps are read as UTC.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ValidationError::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}
