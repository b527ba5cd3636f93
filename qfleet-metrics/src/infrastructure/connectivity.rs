//! Simulated qubit connectivity graphs

use qfleet_core::config::SyntheticConfig;
use rand::Rng;
use std::collections::HashSet;

use super::random::SharedRng;
use super::synthetic::simulated_qubit_count;
use crate::domain::{ConnectivityGraph, QubitGroup, QubitLink, QubitNode};

const ANCILLARY_PROBABILITY: f64 = 0.2;
const EDGE_ATTEMPTS_PER_QUBIT: f64 = 1.5;

/// Random coupling graph for a backend, for demo mode only
#[derive(Debug)]
pub struct ConnectivityGenerator {
    rng: SharedRng,
}

impl ConnectivityGenerator {
    pub fn new(config: &SyntheticConfig) -> Self {
        Self {
            rng: SharedRng::new(config.seed),
        }
    }

    /// One node per qubit and about 1.5 random undirected edges per qubit.
    ///
    /// Self-loops and duplicate pairs are dropped, so the edge count is at most
    /// `ceil(1.5 * qubits)`.
    pub fn generate(&self, backend: &str) -> ConnectivityGraph {
        let qubits = simulated_qubit_count(backend);
        let mut rng = self.rng.lock();

        let nodes = (0..qubits)
            .map(|id| QubitNode {
                id,
                group: if rng.random_bool(ANCILLARY_PROBABILITY) {
                    QubitGroup::Ancillary
                } else {
                    QubitGroup::Core
                },
            })
            .collect();

        let attempts = (f64::from(qubits) * EDGE_ATTEMPTS_PER_QUBIT).ceil() as u32;
        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for _ in 0..attempts {
            let source = rng.random_range(0..qubits);
            let target = rng.random_range(0..qubits);
            if source == target || !seen.insert((source.min(target), source.max(target))) {
                continue;
            }
            links.push(QubitLink {
                source,
                target,
                value: 0.8 + rng.random::<f64>() * 0.2,
            });
        }

        tracing::debug!(backend, qubits, links = links.len(), "Generated connectivity graph");

        ConnectivityGraph { nodes, links }
    }
}
