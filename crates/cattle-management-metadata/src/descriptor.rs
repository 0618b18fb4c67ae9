//!
//! # Resource descriptors
//!
//! Static group/version/kind, plural and scope of every resource kind
//! served by the management API group.
//!
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::k8_types::{Crd, Spec};
use crate::cluster::ClusterSpec;
use crate::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
use crate::global_role::GlobalRoleSpec;
use crate::pod_security_admission::PodSecurityAdmissionConfigurationTemplateSpec;
use crate::project_role_template_binding::ProjectRoleTemplateBindingSpec;
use crate::role_template::RoleTemplateSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupVersionKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
}

impl GroupVersionKind {
    /// `group/version`, or only `version` for the core group
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_owned()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// Immutable description of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub gvk: GroupVersionKind,
    pub plural: &'static str,
    pub namespaced: bool,
}

impl ResourceDescriptor {
    pub const fn new(gvk: GroupVersionKind, plural: &'static str, namespaced: bool) -> Self {
        Self {
            gvk,
            plural,
            namespaced,
        }
    }

    pub const fn from_crd(crd: &'static Crd, namespaced: bool) -> Self {
        Self {
            gvk: GroupVersionKind {
                group: crd.group,
                version: crd.version,
                kind: crd.names.kind,
            },
            plural: crd.names.plural,
            namespaced,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.gvk.kind
    }

    /// name of the backing custom resource definition, ex: `clusters.management.cattle.io`
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.plural, self.gvk.group)
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.crd_name())
    }
}

/// Spec of a resource kind known to the management group
pub trait ResourceSpec:
    Spec + Clone + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn descriptor() -> &'static ResourceDescriptor;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Cluster,
    ClusterRoleTemplateBinding,
    GlobalRole,
    PodSecurityAdmissionConfigurationTemplate,
    ProjectRoleTemplateBinding,
    RoleTemplate,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        Self::Cluster,
        Self::ClusterRoleTemplateBinding,
        Self::GlobalRole,
        Self::PodSecurityAdmissionConfigurationTemplate,
        Self::ProjectRoleTemplateBinding,
        Self::RoleTemplate,
    ];

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        match self {
            Self::Cluster => ClusterSpec::descriptor(),
            Self::ClusterRoleTemplateBinding => ClusterRoleTemplateBindingSpec::descriptor(),
            Self::GlobalRole => GlobalRoleSpec::descriptor(),
            Self::PodSecurityAdmissionConfigurationTemplate => {
                PodSecurityAdmissionConfigurationTemplateSpec::descriptor()
            }
            Self::ProjectRoleTemplateBinding => ProjectRoleTemplateBindingSpec::descriptor(),
            Self::RoleTemplate => RoleTemplateSpec::descriptor(),
        }
    }

    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.descriptor().kind() == kind)
    }

    pub fn from_plural(plural: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.descriptor().plural == plural)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.descriptor().kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_kind(s)
            .or_else(|| Self::from_plural(s))
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}
