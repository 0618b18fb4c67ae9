use crate::k8_types::{Crd, CrdNames, Spec, Status, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::RoleTemplateSpec;
use super::RoleTemplateStatus;

pub const ROLE_TEMPLATE_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "RoleTemplate",
        plural: "roletemplates",
        singular: "roletemplate",
    },
};

pub const ROLE_TEMPLATE_DESCRIPTOR: ResourceDescriptor =
    ResourceDescriptor::from_crd(&ROLE_TEMPLATE_API, false);

impl Spec for RoleTemplateSpec {
    type Status = RoleTemplateStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &ROLE_TEMPLATE_API
    }
}

impl Status for RoleTemplateStatus {}

impl ResourceSpec for RoleTemplateSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &ROLE_TEMPLATE_DESCRIPTOR
    }
}
