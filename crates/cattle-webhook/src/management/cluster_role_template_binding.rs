use cattle_management_metadata::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
use cattle_management_metadata::k8_types::K8Obj;

use crate::{AdmissionError, AdmissionRequest, Admitter, Operation};

use super::rules::{require, unchanged, validate_single_subject};

const SUBJECTS: &str = "a user [userName]/[userPrincipalName] or a group [groupName]/[groupPrincipalName]";

#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterRoleTemplateBindingValidator;

impl ClusterRoleTemplateBindingValidator {
    fn validate(&self, binding: &K8Obj<ClusterRoleTemplateBindingSpec>) -> Result<(), AdmissionError> {
        let spec = &binding.spec;
        require(&spec.role_template_name, "spec.roleTemplateName")?;
        require(&spec.cluster_name, "spec.clusterName")?;
        if spec.cluster_name != binding.metadata.namespace {
            return Err(AdmissionError::invalid(
                "spec.clusterName",
                format!(
                    "clusterName {} must match the binding namespace {}",
                    spec.cluster_name, binding.metadata.namespace
                ),
            ));
        }
        validate_single_subject(&spec.subjects(), SUBJECTS)
    }
}

impl Admitter<ClusterRoleTemplateBindingSpec> for ClusterRoleTemplateBindingValidator {
    fn admit(
        &self,
        request: &AdmissionRequest<'_, ClusterRoleTemplateBindingSpec>,
    ) -> Result<(), AdmissionError> {
        match (request.operation, request.object, request.old_object) {
            (Operation::Create, Some(new), _) => self.validate(new),
            (Operation::Update, Some(new), Some(old)) => {
                unchanged(
                    &new.spec.role_template_name,
                    &old.spec.role_template_name,
                    "spec.roleTemplateName",
                )?;
                unchanged(&new.spec.cluster_name, &old.spec.cluster_name, "spec.clusterName")?;
                unchanged(&new.spec.subjects(), &old.spec.subjects(), "spec")?;
                self.validate(new)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn binding() -> K8Obj<ClusterRoleTemplateBindingSpec> {
        let mut binding = K8Obj::new(
            "crtb-test".to_owned(),
            ClusterRoleTemplateBindingSpec {
                cluster_name: "c-m-test".to_owned(),
                role_template_name: "cluster-member".to_owned(),
                user_name: "u-abc".to_owned(),
                ..Default::default()
            },
        );
        binding.metadata.namespace = "c-m-test".to_owned();
        binding
    }

    #[test]
    fn test_create() {
        let validator = ClusterRoleTemplateBindingValidator;
        assert!(validator.admit(&AdmissionRequest::create(&binding())).is_ok());

        let mut no_template = binding();
        no_template.spec.role_template_name.clear();
        assert_eq!(
            validator
                .admit(&AdmissionRequest::create(&no_template))
                .expect_err("missing template"),
            AdmissionError::required("spec.roleTemplateName")
        );

        let mut other_namespace = binding();
        other_namespace.metadata.namespace = "c-m-other".to_owned();
        assert!(validator.admit(&AdmissionRequest::create(&other_namespace)).is_err());

        let mut two_subjects = binding();
        two_subjects.spec.group_principal_name = "local://admins".to_owned();
        assert!(validator.admit(&AdmissionRequest::create(&two_subjects)).is_err());

        let mut no_subject = binding();
        no_subject.spec.user_name.clear();
        assert!(validator.admit(&AdmissionRequest::create(&no_subject)).is_err());
    }

    #[test]
    fn test_update_is_immutable() {
        let validator = ClusterRoleTemplateBindingValidator;
        let old = binding();

        let mut relabeled = old.clone();
        relabeled
            .metadata
            .labels
            .insert("team".to_owned(), "blue".to_owned());
        assert!(validator.admit(&AdmissionRequest::update(&relabeled, &old)).is_ok());

        let mut new_template = old.clone();
        new_template.spec.role_template_name = "cluster-owner".to_owned();
        assert_eq!(
            validator
                .admit(&AdmissionRequest::update(&new_template, &old))
                .expect_err("immutable"),
            AdmissionError::immutable("spec.roleTemplateName")
        );

        let mut new_user = old.clone();
        new_user.spec.user_name = "u-other".to_owned();
        assert!(validator.admit(&AdmissionRequest::update(&new_user, &old)).is_err());
    }
}
