//!
//! # ProjectRoleTemplateBinding Spec
//!
use serde::{Serialize, Deserialize};

use crate::rbac::Subject;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRoleTemplateBindingSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_principal_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_principal_name: String,
    /// `<cluster>:<project>`
    pub project_name: String,
    pub role_template_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_account: String,
}

impl ProjectRoleTemplateBindingSpec {
    pub fn subjects(&self) -> Vec<Subject> {
        Subject::from_binding_fields(
            &self.user_name,
            &self.user_principal_name,
            &self.group_name,
            &self.group_principal_name,
            &self.service_account,
        )
    }

    /// split project name into cluster and project ids
    pub fn cluster_and_project(&self) -> Option<(&str, &str)> {
        match self.project_name.split_once(':') {
            Some((cluster, project))
                if !cluster.is_empty() && !project.is_empty() && !project.contains(':') =>
            {
                Some((cluster, project))
            }
            _ => None,
        }
    }
}
