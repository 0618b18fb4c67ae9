pub mod descriptor;
pub mod condition;
pub mod rbac;
pub mod cluster;
pub mod global_role;
pub mod role_template;
pub mod cluster_role_template_binding;
pub mod project_role_template_binding;
pub mod pod_security_admission;

pub use k8_types;

pub use descriptor::{GroupVersionKind, ResourceDescriptor, ResourceKind, ResourceSpec};

/// API group of every resource in this crate
pub const GROUP: &str = "management.cattle.io";
pub const V3: &str = "v3";

pub(crate) fn is_false(b: &bool) -> bool {
    !b
}
