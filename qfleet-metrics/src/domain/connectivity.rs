//! Qubit coupling graph

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QubitGroup {
    Core,
    Ancillary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QubitNode {
    pub id: u32,
    pub group: QubitGroup,
}

/// Undirected coupling between two qubits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QubitLink {
    pub source: u32,
    pub target: u32,
    /// Coupling strength in [0.8, 1.0]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConnectivityGraph {
    pub nodes: Vec<QubitNode>,
    pub links: Vec<QubitLink>,
}
