use std::fmt;

use serde::{Serialize, Deserialize};

use crate::condition::{Condition, find_condition};

pub const CLUSTER_CONDITION_READY: &str = "Ready";

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterStatus {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub driver: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_endpoint: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub agent_image: String,
}

impl ClusterStatus {
    pub fn is_ready(&self) -> bool {
        find_condition(&self.conditions, CLUSTER_CONDITION_READY)
            .map(|condition| condition.is_true())
            .unwrap_or(false)
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_ready() {
            write!(f, "Ready")
        } else {
            write!(f, "NotReady")
        }
    }
}
