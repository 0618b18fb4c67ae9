use cattle_management_metadata::k8_types::K8Obj;
use cattle_management_metadata::project_role_template_binding::ProjectRoleTemplateBindingSpec;

use crate::{AdmissionError, AdmissionRequest, Admitter, Operation};

use super::rules::{require, unchanged, validate_single_subject};

const SUBJECTS: &str = "a user [userName]/[userPrincipalName], a group [groupName]/[groupPrincipalName], or a service account [serviceAccount]";

#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectRoleTemplateBindingValidator;

impl ProjectRoleTemplateBindingValidator {
    fn validate(&self, binding: &K8Obj<ProjectRoleTemplateBindingSpec>) -> Result<(), AdmissionError> {
        let spec = &binding.spec;
        require(&spec.role_template_name, "spec.roleTemplateName")?;
        require(&spec.project_name, "spec.projectName")?;
        if spec.cluster_and_project().is_none() {
            return Err(AdmissionError::invalid(
                "spec.projectName",
                format!(
                    "projectName {} must be of the form <cluster>:<project>",
                    spec.project_name
                ),
            ));
        }
        validate_single_subject(&spec.subjects(), SUBJECTS)
    }
}

impl Admitter<ProjectRoleTemplateBindingSpec> for ProjectRoleTemplateBindingValidator {
    fn admit(
        &self,
        request: &AdmissionRequest<'_, ProjectRoleTemplateBindingSpec>,
    ) -> Result<(), AdmissionError> {
        match (request.operation, request.object, request.old_object) {
            (Operation::Create, Some(new), _) => self.validate(new),
            (Operation::Update, Some(new), Some(old)) => {
                unchanged(
                    &new.spec.role_template_name,
                    &old.spec.role_template_name,
                    "spec.roleTemplateName",
                )?;
                unchanged(&new.spec.project_name, &old.spec.project_name, "spec.projectName")?;
                unchanged(&new.spec.subjects(), &old.spec.subjects(), "spec")?;
                self.validate(new)
            }
            _ => Ok(()),
        }
    }
}
