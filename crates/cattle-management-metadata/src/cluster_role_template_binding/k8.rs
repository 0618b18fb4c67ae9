use crate::k8_types::{Crd, CrdNames, Spec, Status, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::ClusterRoleTemplateBindingSpec;
use super::BindingStatus;

pub const CLUSTER_ROLE_TEMPLATE_BINDING_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "ClusterRoleTemplateBinding",
        plural: "clusterroletemplatebindings",
        singular: "clusterroletemplatebinding",
    },
};

pub const CLUSTER_ROLE_TEMPLATE_BINDING_DESCRIPTOR: ResourceDescriptor =
    ResourceDescriptor::from_crd(&CLUSTER_ROLE_TEMPLATE_BINDING_API, true);

impl Spec for ClusterRoleTemplateBindingSpec {
    type Status = BindingStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &CLUSTER_ROLE_TEMPLATE_BINDING_API
    }
}

impl Status for BindingStatus {}

impl ResourceSpec for ClusterRoleTemplateBindingSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &CLUSTER_ROLE_TEMPLATE_BINDING_DESCRIPTOR
    }
}
