use cattle_management_metadata::k8_types::K8Obj;
use cattle_management_metadata::role_template::RoleTemplateSpec;

use crate::{AdmissionError, AdmissionRequest, Admitter, Operation};

use super::rules::validate_rules;

const KIND: &str = "RoleTemplate";

#[derive(Debug, Default, Clone, Copy)]
pub struct RoleTemplateValidator;

impl RoleTemplateValidator {
    fn validate(&self, template: &K8Obj<RoleTemplateSpec>) -> Result<(), AdmissionError> {
        let spec = &template.spec;
        spec.role_context()
            .map_err(|err| AdmissionError::invalid("spec.context", err))?;

        if spec
            .role_template_names
            .iter()
            .any(|inherited| inherited == &template.metadata.name)
        {
            return Err(AdmissionError::invalid(
                "spec.roleTemplateNames",
                "role template can't inherit from itself",
            ));
        }

        if !spec.external {
            validate_rules(&spec.rules, "spec.rules")?;
        }
        Ok(())
    }

    /// builtin templates only allow their default and lock flags to change
    fn validate_builtin_update(
        &self,
        new: &K8Obj<RoleTemplateSpec>,
        old: &K8Obj<RoleTemplateSpec>,
    ) -> Result<(), AdmissionError> {
        if !old.spec.builtin {
            if new.spec.builtin {
                return Err(AdmissionError::denied(
                    KIND,
                    &new.metadata.name,
                    "cannot update non-builtin RoleTemplate to be builtin",
                ));
            }
            return Ok(());
        }

        let mut expected = old.spec.clone();
        expected.locked = new.spec.locked;
        expected.cluster_creator_default = new.spec.cluster_creator_default;
        expected.project_creator_default = new.spec.project_creator_default;
        if new.spec != expected {
            return Err(AdmissionError::denied(
                KIND,
                &new.metadata.name,
                "updates to builtin RoleTemplates for fields other than default or locked are forbidden",
            ));
        }
        Ok(())
    }
}

impl Admitter<RoleTemplateSpec> for RoleTemplateValidator {
    fn admit(&self, request: &AdmissionRequest<'_, RoleTemplateSpec>) -> Result<(), AdmissionError> {
        match (request.operation, request.object, request.old_object) {
            (Operation::Create, Some(new), _) => {
                if new.spec.builtin {
                    return Err(AdmissionError::denied(
                        KIND,
                        &new.metadata.name,
                        "creating builtin RoleTemplates is not allowed",
                    ));
                }
                self.validate(new)
            }
            (Operation::Update, Some(new), Some(old)) => {
                self.validate_builtin_update(new, old)?;
                self.validate(new)
            }
            (Operation::Delete, _, Some(old)) if old.spec.builtin => Err(AdmissionError::denied(
                KIND,
                &old.metadata.name,
                "cannot delete builtin RoleTemplates",
            )),
            _ => Ok(()),
        }
    }
}
