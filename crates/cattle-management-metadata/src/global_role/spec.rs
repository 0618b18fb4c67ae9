//!
//! # GlobalRole Spec
//!
//! Permissions granted across every downstream cluster and the
//! management cluster itself.
//!
use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::is_false;
use crate::rbac::PolicyRule;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalRoleSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<PolicyRule>,
    /// assigned to every newly created user
    #[serde(skip_serializing_if = "is_false")]
    pub new_user_default: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub builtin: bool,
    /// role templates granted in every downstream cluster
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherited_cluster_roles: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaced_rules: BTreeMap<String, Vec<PolicyRule>>,
}

impl GlobalRoleSpec {
    /// every rule of the role, cluster wide ones first
    pub fn all_rules(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules
            .iter()
            .chain(self.namespaced_rules.values().flatten())
    }
}
