// Code generated by codegen. DO NOT EDIT.

use std::sync::Arc;

use cattle_management_metadata::GroupVersionKind;
use cattle_management_metadata::cluster::ClusterSpec;
use cattle_management_metadata::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
use cattle_management_metadata::global_role::GlobalRoleSpec;
use cattle_management_metadata::pod_security_admission::PodSecurityAdmissionConfigurationTemplateSpec;
use cattle_management_metadata::project_role_template_binding::ProjectRoleTemplateBindingSpec;
use cattle_management_metadata::role_template::RoleTemplateSpec;

use crate::client::MetadataClient;
use crate::controller::Controller;
use crate::factory::SharedControllerFactory;

pub type ClusterController<C> = Controller<ClusterSpec, C>;
pub type ClusterRoleTemplateBindingController<C> = Controller<ClusterRoleTemplateBindingSpec, C>;
pub type GlobalRoleController<C> = Controller<GlobalRoleSpec, C>;
pub type PodSecurityAdmissionConfigurationTemplateController<C> =
    Controller<PodSecurityAdmissionConfigurationTemplateSpec, C>;
pub type ProjectRoleTemplateBindingController<C> = Controller<ProjectRoleTemplateBindingSpec, C>;
pub type RoleTemplateController<C> = Controller<RoleTemplateSpec, C>;

pub trait Interface<C> {
    fn cluster(&self) -> ClusterController<C>;
    fn cluster_role_template_binding(&self) -> ClusterRoleTemplateBindingController<C>;
    fn global_role(&self) -> GlobalRoleController<C>;
    fn pod_security_admission_configuration_template(
        &self,
    ) -> PodSecurityAdmissionConfigurationTemplateController<C>;
    fn project_role_template_binding(&self) -> ProjectRoleTemplateBindingController<C>;
    fn role_template(&self) -> RoleTemplateController<C>;
}

#[derive(Debug)]
pub struct Version<C> {
    controller_factory: Arc<SharedControllerFactory<C>>,
}

pub fn new<C: MetadataClient>(controller_factory: Arc<SharedControllerFactory<C>>) -> Version<C> {
    Version { controller_factory }
}

impl<C: MetadataClient> Interface<C> for Version<C> {
    fn cluster(&self) -> ClusterController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "Cluster",
            },
            "clusters",
            false,
            self.controller_factory.clone(),
        )
    }

    fn cluster_role_template_binding(&self) -> ClusterRoleTemplateBindingController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "ClusterRoleTemplateBinding",
            },
            "clusterroletemplatebindings",
            true,
            self.controller_factory.clone(),
        )
    }

    fn global_role(&self) -> GlobalRoleController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "GlobalRole",
            },
            "globalroles",
            false,
            self.controller_factory.clone(),
        )
    }

    fn pod_security_admission_configuration_template(
        &self,
    ) -> PodSecurityAdmissionConfigurationTemplateController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "PodSecurityAdmissionConfigurationTemplate",
            },
            "podsecurityadmissionconfigurationtemplates",
            false,
            self.controller_factory.clone(),
        )
    }

    fn project_role_template_binding(&self) -> ProjectRoleTemplateBindingController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "ProjectRoleTemplateBinding",
            },
            "projectroletemplatebindings",
            true,
            self.controller_factory.clone(),
        )
    }

    fn role_template(&self) -> RoleTemplateController<C> {
        Controller::new(
            GroupVersionKind {
                group: "management.cattle.io",
                version: "v3",
                kind: "RoleTemplate",
            },
            "roletemplates",
            false,
            self.controller_factory.clone(),
        )
    }
}
