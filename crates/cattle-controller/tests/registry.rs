use std::sync::Arc;

use cattle_controller::management::v3::Interface;
use cattle_controller::metadata::{ResourceKind, ResourceSpec};
use cattle_controller::metadata::cluster::ClusterSpec;
use cattle_controller::metadata::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
use cattle_controller::metadata::global_role::GlobalRoleSpec;
use cattle_controller::metadata::pod_security_admission::PodSecurityAdmissionConfigurationTemplateSpec;
use cattle_controller::metadata::project_role_template_binding::ProjectRoleTemplateBindingSpec;
use cattle_controller::metadata::role_template::RoleTemplateSpec;
use cattle_controller::{ControllerFactoryConfig, Factory, MemoryClient};

fn factory() -> Factory<MemoryClient> {
    Factory::new(MemoryClient::new_shared(), ControllerFactoryConfig::default())
}

#[test]
fn accessors_match_resource_descriptors() {
    let v3 = factory().management().v3();

    assert_eq!(v3.cluster().descriptor(), ClusterSpec::descriptor());
    assert_eq!(
        v3.cluster_role_template_binding().descriptor(),
        ClusterRoleTemplateBindingSpec::descriptor()
    );
    assert_eq!(v3.global_role().descriptor(), GlobalRoleSpec::descriptor());
    assert_eq!(
        v3.pod_security_admission_configuration_template().descriptor(),
        PodSecurityAdmissionConfigurationTemplateSpec::descriptor()
    );
    assert_eq!(
        v3.project_role_template_binding().descriptor(),
        ProjectRoleTemplateBindingSpec::descriptor()
    );
    assert_eq!(v3.role_template().descriptor(), RoleTemplateSpec::descriptor());
}

#[test]
fn accessor_literals() {
    let v3 = factory().management().v3();

    let cluster = v3.cluster();
    assert_eq!(cluster.gvk().to_string(), "management.cattle.io/v3, Kind=Cluster");
    assert_eq!(cluster.descriptor().plural, "clusters");
    assert!(!cluster.descriptor().namespaced);

    let crtb = v3.cluster_role_template_binding();
    assert_eq!(crtb.descriptor().plural, "clusterroletemplatebindings");
    assert!(crtb.descriptor().namespaced);

    let prtb = v3.project_role_template_binding();
    assert_eq!(prtb.gvk().kind, "ProjectRoleTemplateBinding");
    assert!(prtb.descriptor().namespaced);

    assert_eq!(
        v3.pod_security_admission_configuration_template()
            .descriptor()
            .plural,
        "podsecurityadmissionconfigurationtemplates"
    );
}

#[test]
fn accessors_share_factory_and_controller() {
    let factory = factory();
    let v3 = factory.management().v3();

    let first = v3.global_role();
    let second = factory.management().v3().global_role();

    assert!(Arc::ptr_eq(first.factory(), factory.controller_factory()));
    assert!(Arc::ptr_eq(first.factory(), second.factory()));
    assert!(Arc::ptr_eq(first.shared(), second.shared()));

    v3.cluster();
    v3.cluster_role_template_binding();
    v3.pod_security_admission_configuration_template();
    v3.project_role_template_binding();
    v3.role_template();
    assert_eq!(
        factory.controller_factory().controller_count(),
        ResourceKind::ALL.len()
    );
}
