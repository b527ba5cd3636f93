//! Mapping of untyped source payloads onto the canonical model

use qfleet_core::domain::{
    Backend, BackendStatus, Job, JobStatus, StatusHistoryEntry, ValidationError, parse_timestamp,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Outcome of normalizing a batch of records
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub accepted: Vec<T>,
    pub rejected: usize,
}

/// Look up a field under any of its accepted spellings, skipping nulls
fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
}

fn required_str<'a>(
    record: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    match field(record, &[name]) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ValidationError::invalid(name, other)),
        None => Err(ValidationError::missing(name)),
    }
}

/// Identifiers may arrive as strings or numbers
fn required_id(record: &Map<String, Value>, name: &'static str) -> Result<String, ValidationError> {
    match field(record, &[name]) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ValidationError::invalid(name, other)),
        None => Err(ValidationError::missing(name)),
    }
}

fn optional_string(record: &Map<String, Value>, names: &[&str]) -> String {
    match field(record, names) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn optional_f64(
    record: &Map<String, Value>,
    names: &[&str],
    name: &'static str,
) -> Result<f64, ValidationError> {
    match field(record, names) {
        None => Ok(0.0),
        Some(value) => value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| ValidationError::invalid(name, value)),
    }
}

fn optional_u32(
    record: &Map<String, Value>,
    names: &[&str],
    name: &'static str,
) -> Result<u32, ValidationError> {
    match field(record, names) {
        None => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ValidationError::invalid(name, value)),
    }
}

fn results(record: &Map<String, Value>) -> Result<BTreeMap<String, u64>, ValidationError> {
    let Some(value) = field(record, &["results"]) else {
        return Ok(BTreeMap::new());
    };
    let Value::Object(map) = value else {
        return Err(ValidationError::invalid("results", value));
    };

    map.iter()
        .map(|(label, count)| {
            count
                .as_u64()
                .map(|count| (label.clone(), count))
                .ok_or_else(|| ValidationError::invalid("results", count))
        })
        .collect()
}

fn status_history(record: &Map<String, Value>) -> Result<Vec<StatusHistoryEntry>, ValidationError> {
    let Some(value) = field(record, &["status_history", "statusHistory"]) else {
        return Ok(Vec::new());
    };
    let Value::Array(entries) = value else {
        return Err(ValidationError::invalid("status_history", value));
    };

    entries
        .iter()
        .map(|entry| {
            let Value::Object(entry) = entry else {
                return Err(ValidationError::invalid("status_history", entry));
            };
            let status = required_str(entry, "status")?.parse::<JobStatus>()?;
            let timestamp = parse_timestamp("timestamp", required_str(entry, "timestamp")?)?;
            Ok(StatusHistoryEntry::new(status, timestamp))
        })
        .collect()
}

/// Map one job record onto [`Job`].
///
/// `id`, `status` and `submitted` are mandatory. Optional numerics default to
/// zero and `results` to an empty map. The status history is passed through as
/// given; its consistency is not enforced here.
pub fn normalize_job(value: &Value) -> Result<Job, ValidationError> {
    let Value::Object(record) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let id = required_id(record, "id")?;
    let status = required_str(record, "status")?.parse::<JobStatus>()?;
    let submitted = parse_timestamp("submitted", required_str(record, "submitted")?)?;

    Ok(Job {
        id,
        status,
        backend: optional_string(record, &["backend"]),
        submitted,
        elapsed_time: optional_f64(record, &["elapsed_time", "elapsedTime"], "elapsed_time")?,
        user: optional_string(record, &["user"]),
        qpu_seconds: optional_f64(record, &["qpu_seconds", "qpuSeconds"], "qpu_seconds")?,
        logs: optional_string(record, &["logs"]),
        results: results(record)?,
        status_history: status_history(record)?,
    })
}

/// Map one backend record onto [`Backend`]. Only `name` and `status` are mandatory.
pub fn normalize_backend(value: &Value) -> Result<Backend, ValidationError> {
    let Value::Object(record) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let name = required_id(record, "name")?;
    let status = required_str(record, "status")?.parse::<BackendStatus>()?;

    let error_rate = optional_f64(record, &["error_rate", "errorRate"], "error_rate")?;
    if error_rate > 1.0 {
        return Err(ValidationError::invalid("error_rate", error_rate));
    }

    Ok(Backend {
        name,
        status,
        qubit_count: optional_u32(record, &["qubit_count", "qubitCount"], "qubit_count")?,
        queue_depth: optional_u32(record, &["queue_depth", "queueDepth"], "queue_depth")?,
        error_rate,
    })
}

fn normalize_batch<T>(
    kind: &'static str,
    records: &[Value],
    normalize: impl Fn(&Value) -> Result<T, ValidationError>,
) -> Normalized<T> {
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = 0;

    for (index, record) in records.iter().enumerate() {
        match normalize(record) {
            Ok(item) => accepted.push(item),
            Err(e) => {
                rejected += 1;
                tracing::warn!(kind, index, error = %e, "Rejected malformed source record");
            }
        }
    }

    if rejected > 0 {
        tracing::info!(kind, accepted = accepted.len(), rejected, "Normalized batch with rejections");
    }

    Normalized { accepted, rejected }
}

/// Normalize every job record, skipping the malformed ones
pub fn normalize_jobs(records: &[Value]) -> Normalized<Job> {
    let normalized = normalize_batch("job", records, normalize_job);
    let inconsistent = normalized
        .accepted
        .iter()
        .filter(|job| !job.history_is_consistent())
        .count();
    if inconsistent > 0 {
        tracing::debug!(inconsistent, "Accepted jobs whose status history disagrees with their status");
    }
    normalized
}

pub fn normalize_backends(records: &[Value]) -> Normalized<Backend> {
    normalize_batch("backend", records, normalize_backend)
}
