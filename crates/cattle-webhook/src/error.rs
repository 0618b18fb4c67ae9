use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("{kind} \"{name}\" denied: {reason}")]
    Denied {
        kind: &'static str,
        name: String,
        reason: String,
    },
    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl AdmissionError {
    pub fn denied(kind: &'static str, name: impl Into<String>, reason: impl Display) -> Self {
        Self::Denied {
            kind,
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Display) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::invalid(field, "Required value")
    }

    pub fn immutable(field: impl Into<String>) -> Self {
        Self::invalid(field, "field is immutable")
    }
}
