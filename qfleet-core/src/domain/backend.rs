//! Backend entity

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::ValidationError;

/// Operational state of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Active,
    Inactive,
    Maintenance,
}

impl BackendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendStatus::Active => "active",
            BackendStatus::Inactive => "inactive",
            BackendStatus::Maintenance => "maintenance",
        }
    }
}

impl FromStr for BackendStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(BackendStatus::Active),
            "inactive" => Ok(BackendStatus::Inactive),
            "maintenance" => Ok(BackendStatus::Maintenance),
            _ => Err(ValidationError::InvalidBackendStatus(s.to_string())),
        }
    }
}

/// A quantum compute resource, read-only per fetch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Backend {
    #[schema(example = "ibm_brisbane")]
    pub name: String,
    pub status: BackendStatus,
    #[schema(example = 127)]
    pub qubit_count: u32,
    pub queue_depth: u32,
    #[schema(example = 0.012)]
    pub error_rate: f64,
}
