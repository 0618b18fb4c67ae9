//!
//! # Cluster Spec
//!
use serde::{Serialize, Deserialize};

use crate::is_false;

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub internal: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fleet_workspace_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desired_agent_image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desired_auth_image: String,
    /// present only for clusters provisioned through RKE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rancher_kubernetes_engine_config: Option<RancherKubernetesEngineConfig>,
}

impl ClusterSpec {
    pub fn is_rke(&self) -> bool {
        self.rancher_kubernetes_engine_config.is_some()
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RancherKubernetesEngineConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_docker_version: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<RkeConfigNode>,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RkeConfigNode {
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    pub role: Vec<String>,
}
