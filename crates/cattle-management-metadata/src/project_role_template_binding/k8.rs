use crate::k8_types::{Crd, CrdNames, Spec, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::ProjectRoleTemplateBindingSpec;
use super::BindingStatus;

pub const PROJECT_ROLE_TEMPLATE_BINDING_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "ProjectRoleTemplateBinding",
        plural: "projectroletemplatebindings",
        singular: "projectroletemplatebinding",
    },
};

pub const PROJECT_ROLE_TEMPLATE_BINDING_DESCRIPTOR: ResourceDescriptor =
    ResourceDescriptor::from_crd(&PROJECT_ROLE_TEMPLATE_BINDING_API, true);

impl Spec for ProjectRoleTemplateBindingSpec {
    type Status = BindingStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &PROJECT_ROLE_TEMPLATE_BINDING_API
    }
}

impl ResourceSpec for ProjectRoleTemplateBindingSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &PROJECT_ROLE_TEMPLATE_BINDING_DESCRIPTOR
    }
}
