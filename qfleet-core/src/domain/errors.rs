//! Record validation errors

use thiserror::Error;

/// A source record could not be mapped onto the canonical model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing mandatory field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` has an invalid value: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("unrecognized job status `{0}`")]
    InvalidJobStatus(String),

    #[error("unrecognized backend status `{0}`")]
    InvalidBackendStatus(String),

    #[error("field `{field}` is not a valid ISO-8601 timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
