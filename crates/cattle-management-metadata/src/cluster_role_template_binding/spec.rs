//!
//! # ClusterRoleTemplateBinding Spec
//!
//! Grants a role template to a user or group inside one downstream cluster.
//! Objects live in the namespace named after the cluster.
//!
use serde::{Serialize, Deserialize};

use crate::rbac::Subject;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterRoleTemplateBindingSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_principal_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_principal_name: String,
    pub cluster_name: String,
    pub role_template_name: String,
}

impl ClusterRoleTemplateBindingSpec {
    pub fn subjects(&self) -> Vec<Subject> {
        Subject::from_binding_fields(
            &self.user_name,
            &self.user_principal_name,
            &self.group_name,
            &self.group_principal_name,
            "",
        )
    }
}
