use thiserror::Error;

use cattle_webhook::AdmissionError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: &'static str, name: String },
    #[error("{kind} \"{name}\" already exists")]
    AlreadyExists { kind: &'static str, name: String },
    #[error(
        "operation cannot be fulfilled on {kind} \"{name}\": the object has been modified; please apply your changes to the latest version and try again"
    )]
    Conflict { kind: &'static str, name: String },
    #[error("{kind} is invalid: {reason}")]
    Invalid { kind: &'static str, reason: String },
    #[error("admission webhook denied the request: {0}")]
    Admission(#[from] AdmissionError),
    #[error("Yaml serialization error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// rejected by api validation or admission
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Admission(_))
    }
}
