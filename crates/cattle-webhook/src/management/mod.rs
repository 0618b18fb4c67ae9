//!
//! # management.cattle.io/v3 validators
//!
mod rules;
mod global_role;
mod role_template;
mod cluster_role_template_binding;
mod project_role_template_binding;
mod pod_security_admission;

pub use global_role::GlobalRoleValidator;
pub use role_template::RoleTemplateValidator;
pub use cluster_role_template_binding::ClusterRoleTemplateBindingValidator;
pub use project_role_template_binding::ProjectRoleTemplateBindingValidator;
pub use pod_security_admission::PodSecurityAdmissionTemplateValidator;

use cattle_management_metadata::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
use cattle_management_metadata::global_role::GlobalRoleSpec;
use cattle_management_metadata::pod_security_admission::PodSecurityAdmissionConfigurationTemplateSpec;
use cattle_management_metadata::project_role_template_binding::ProjectRoleTemplateBindingSpec;
use cattle_management_metadata::role_template::RoleTemplateSpec;

use crate::AdmissionRegistry;

/// install validators of every v3 kind that has one.
/// clusters are admitted without additional rules.
pub fn register_management_v3(registry: &mut AdmissionRegistry) {
    registry.register::<GlobalRoleSpec, _>(GlobalRoleValidator);
    registry.register::<RoleTemplateSpec, _>(RoleTemplateValidator);
    registry.register::<ClusterRoleTemplateBindingSpec, _>(ClusterRoleTemplateBindingValidator);
    registry.register::<ProjectRoleTemplateBindingSpec, _>(ProjectRoleTemplateBindingValidator);
    registry.register::<PodSecurityAdmissionConfigurationTemplateSpec, _>(
        PodSecurityAdmissionTemplateValidator,
    );
}

#[cfg(test)]
mod test {
    use cattle_management_metadata::ResourceKind;
    use cattle_management_metadata::k8_types::K8Obj;

    use crate::{AdmissionError, AdmissionRequest};

    use super::*;

    #[test]
    fn test_register_management_v3() {
        let mut registry = AdmissionRegistry::default();
        register_management_v3(&mut registry);
        assert_eq!(registry.len(), 5);
        assert!(!registry.contains(&ResourceKind::Cluster.descriptor().gvk));
        assert!(registry.contains(&ResourceKind::GlobalRole.descriptor().gvk));
    }

    #[test]
    fn test_review_json_payloads() {
        let mut registry = AdmissionRegistry::default();
        register_management_v3(&mut registry);

        let valid: K8Obj<RoleTemplateSpec> = serde_json::from_str(
            r#"{
  "metadata": { "name": "rt-read-configmaps" },
  "spec": {
    "displayName": "Read ConfigMaps",
    "context": "project",
    "rules": [ { "verbs": ["get", "list"], "resources": ["configmaps"] } ]
  }
}"#,
        )
        .expect("role template json");
        registry
            .review(&AdmissionRequest::create(&valid))
            .expect("valid role template");

        let invalid: K8Obj<ClusterRoleTemplateBindingSpec> = serde_json::from_str(
            r#"{
  "metadata": { "name": "crtb-abc", "namespace": "c-abc" },
  "spec": {
    "userName": "u-abc",
    "groupName": "g-abc",
    "clusterName": "c-abc",
    "roleTemplateName": "cluster-member"
  }
}"#,
        )
        .expect("binding json");
        assert!(matches!(
            registry.review(&AdmissionRequest::create(&invalid)),
            Err(AdmissionError::Invalid { .. })
        ));
    }
}
