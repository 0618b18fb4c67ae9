//!
//! # RoleTemplate Spec
//!
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::is_false;
use crate::rbac::PolicyRule;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleTemplateSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<PolicyRule>,
    #[serde(skip_serializing_if = "is_false")]
    pub builtin: bool,
    /// rules come from an existing cluster role instead of `rules`
    #[serde(skip_serializing_if = "is_false")]
    pub external: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// locked templates can't be used in new bindings
    #[serde(skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub administrative: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub cluster_creator_default: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub project_creator_default: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_template_names: Vec<String>,
}

impl RoleTemplateSpec {
    pub fn role_context(&self) -> Result<Option<RoleContext>, InvalidRoleContext> {
        if self.context.is_empty() {
            Ok(None)
        } else {
            self.context.parse().map(Some)
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoleContext {
    Cluster,
    Project,
}

impl fmt::Display for RoleContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Cluster => write!(f, "cluster"),
            Self::Project => write!(f, "project"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid role template context: {0}")]
pub struct InvalidRoleContext(pub String);

impl FromStr for RoleContext {
    type Err = InvalidRoleContext;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster" => Ok(Self::Cluster),
            "project" => Ok(Self::Project),
            other => Err(InvalidRoleContext(other.to_owned())),
        }
    }
}
