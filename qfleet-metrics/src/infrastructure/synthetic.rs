//! Synthetic fleet generator for demo mode and live-source fallback

use chrono::{DateTime, Duration, Utc};
use qfleet_core::config::SyntheticConfig;
use qfleet_core::domain::{Backend, BackendStatus, Job, JobStatus, StatusHistoryEntry};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

use super::random::SharedRng;
use crate::domain::{FleetSnapshot, SourceTelemetry};

const USERS: [&str; 5] = ["Alice", "Bob", "Charlie", "David", "Eve"];

const TARGET_STATUSES: [JobStatus; 5] = [
    JobStatus::Completed,
    JobStatus::Running,
    JobStatus::Queued,
    JobStatus::Error,
    JobStatus::Cancelled,
];

const MAX_QUEUE_MINUTES: i64 = 30;
const MAX_RUN_MINUTES: i64 = 10;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Static description of one simulated backend
struct BackendProfile {
    name: &'static str,
    qubit_count: u32,
    error_rate: f64,
    max_queue_depth: u32,
    /// Probability and status of being out of service on a given cycle
    outage: Option<(f64, BackendStatus)>,
}

const FLEET: [BackendProfile; 6] = [
    BackendProfile {
        name: "ibm_brisbane",
        qubit_count: 127,
        error_rate: 0.012,
        max_queue_depth: 10,
        outage: None,
    },
    BackendProfile {
        name: "ibm_kyoto",
        qubit_count: 127,
        error_rate: 0.015,
        max_queue_depth: 10,
        outage: None,
    },
    BackendProfile {
        name: "ibm_osaka",
        qubit_count: 127,
        error_rate: 0.011,
        max_queue_depth: 10,
        outage: None,
    },
    BackendProfile {
        name: "ibmq_kolkata",
        qubit_count: 27,
        error_rate: 0.025,
        max_queue_depth: 0,
        outage: Some((0.2, BackendStatus::Maintenance)),
    },
    BackendProfile {
        name: "ibmq_mumbai",
        qubit_count: 27,
        error_rate: 0.021,
        max_queue_depth: 5,
        outage: None,
    },
    BackendProfile {
        name: "ibmq_auckland",
        qubit_count: 27,
        error_rate: 0.033,
        max_queue_depth: 0,
        outage: Some((0.1, BackendStatus::Inactive)),
    },
];

/// Qubit count of a simulated backend, 27 for names outside the fleet
pub fn simulated_qubit_count(backend: &str) -> u32 {
    FLEET
        .iter()
        .find(|profile| profile.name == backend)
        .map_or(27, |profile| profile.qubit_count)
}

/// Generates a fleet snapshot whose jobs obey the lifecycle invariants
#[derive(Debug)]
pub struct SyntheticFleetGenerator {
    rng: SharedRng,
    job_count: usize,
    history: Duration,
}

impl SyntheticFleetGenerator {
    pub fn new(config: &SyntheticConfig) -> Self {
        Self {
            rng: SharedRng::new(config.seed),
            job_count: config.job_count,
            history: Duration::days(i64::from(config.history_days)),
        }
    }

    #[tracing::instrument(skip(self), fields(job_count = self.job_count))]
    pub fn generate(&self, now: DateTime<Utc>) -> FleetSnapshot {
        let mut rng = self.rng.lock();

        let backends: Vec<Backend> = FLEET.iter().map(|p| backend(&mut rng, p)).collect();
        let jobs = (0..self.job_count)
            .map(|i| self.job(&mut rng, i, now))
            .collect();

        let telemetry = SourceTelemetry {
            open_sessions: rng.random_range(1..=5),
            api_speed_ms: Some(rng.random_range(50..=250)),
        };

        FleetSnapshot {
            backends,
            jobs,
            telemetry,
        }
    }

    fn job(&self, rng: &mut StdRng, index: usize, now: DateTime<Utc>) -> Job {
        let target = TARGET_STATUSES[rng.random_range(0..TARGET_STATUSES.len())];
        let backend = FLEET[rng.random_range(0..FLEET.len())].name;

        let age = rng.random_range(0..self.history.num_seconds().max(1));
        let submitted = now - Duration::seconds(age);
        let started = submitted + Duration::minutes(rng.random_range(0..=MAX_QUEUE_MINUTES));
        let finished = started + Duration::minutes(rng.random_range(0..=MAX_RUN_MINUTES));

        let mut status_history = vec![StatusHistoryEntry::new(JobStatus::Queued, submitted)];
        let (status, elapsed) = if target == JobStatus::Queued || now < started {
            (JobStatus::Queued, Duration::zero())
        } else if target == JobStatus::Running || now < finished {
            status_history.push(StatusHistoryEntry::new(JobStatus::Running, started));
            (JobStatus::Running, now - started)
        } else {
            status_history.push(StatusHistoryEntry::new(JobStatus::Running, started));
            status_history.push(StatusHistoryEntry::new(target, finished));
            (target, finished - started)
        };

        let completed = status == JobStatus::Completed;

        Job {
            id: job_id(rng, index),
            status,
            backend: backend.to_string(),
            submitted,
            elapsed_time: elapsed.num_seconds().max(0) as f64,
            user: USERS[index % USERS.len()].to_string(),
            qpu_seconds: if completed { rng.random::<f64>() * 10.0 } else { 0.0 },
            logs: match status {
                JobStatus::Error => "Error: Qubit calibration failed.".to_string(),
                _ => "Job executed successfully.".to_string(),
            },
            results: if completed {
                BTreeMap::from([
                    ("001".to_string(), 102),
                    ("110".to_string(), 34),
                    ("101".to_string(), 410),
                ])
            } else {
                BTreeMap::new()
            },
            status_history,
        }
    }
}

fn backend(rng: &mut StdRng, profile: &BackendProfile) -> Backend {
    let status = match profile.outage {
        Some((probability, status)) if rng.random_bool(probability) => status,
        _ => BackendStatus::Active,
    };
    let queue_depth = if profile.max_queue_depth == 0 {
        0
    } else {
        rng.random_range(0..profile.max_queue_depth)
    };

    Backend {
        name: profile.name.to_string(),
        status,
        qubit_count: profile.qubit_count,
        queue_depth,
        error_rate: profile.error_rate,
    }
}

fn job_id(rng: &mut StdRng, index: usize) -> String {
    let suffix: String = (0..9)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("c{suffix}q{index}")
}
