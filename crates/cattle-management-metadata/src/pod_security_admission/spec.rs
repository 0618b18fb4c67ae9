//!
//! # PodSecurityAdmissionConfigurationTemplate Spec
//!
//! Pod Security Admission defaults and exemptions applied to downstream clusters.
//!
use serde::{Serialize, Deserialize};

/// templates shipped with the management server
pub const PRIVILEGED_TEMPLATE: &str = "rancher-privileged";
pub const RESTRICTED_TEMPLATE: &str = "rancher-restricted";

pub const PSA_LEVELS: [&str; 3] = ["privileged", "baseline", "restricted"];

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSecurityAdmissionConfigurationTemplateSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub configuration: PodSecurityAdmissionConfiguration,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSecurityAdmissionConfiguration {
    pub defaults: PodSecurityAdmissionDefaults,
    pub exemptions: PodSecurityAdmissionExemptions,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSecurityAdmissionDefaults {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enforce: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enforce_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub audit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub audit_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub warn: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub warn_version: String,
}

impl PodSecurityAdmissionDefaults {
    pub fn new(level: &str) -> Self {
        Self {
            enforce: level.to_owned(),
            enforce_version: "latest".to_owned(),
            audit: level.to_owned(),
            audit_version: "latest".to_owned(),
            warn: level.to_owned(),
            warn_version: "latest".to_owned(),
        }
    }

    /// (mode, level) pairs
    pub fn levels(&self) -> [(&'static str, &str); 3] {
        [
            ("enforce", self.enforce.as_str()),
            ("audit", self.audit.as_str()),
            ("warn", self.warn.as_str()),
        ]
    }

    /// (mode, version) pairs
    pub fn versions(&self) -> [(&'static str, &str); 3] {
        [
            ("enforce-version", self.enforce_version.as_str()),
            ("audit-version", self.audit_version.as_str()),
            ("warn-version", self.warn_version.as_str()),
        ]
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSecurityAdmissionExemptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub usernames: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runtime_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
}

/// true if name is one of the templates shipped with the server
pub fn is_builtin_template(name: &str) -> bool {
    name == PRIVILEGED_TEMPLATE || name == RESTRICTED_TEMPLATE
}
