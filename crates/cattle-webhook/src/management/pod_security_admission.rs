use cattle_management_metadata::k8_types::K8Obj;
use cattle_management_metadata::pod_security_admission::{
    PSA_LEVELS, PodSecurityAdmissionConfigurationTemplateSpec, is_builtin_template,
};

use crate::{AdmissionError, AdmissionRequest, Admitter, Operation};

const KIND: &str = "PodSecurityAdmissionConfigurationTemplate";

#[derive(Debug, Default, Clone, Copy)]
pub struct PodSecurityAdmissionTemplateValidator;

impl PodSecurityAdmissionTemplateValidator {
    fn validate(
        &self,
        template: &K8Obj<PodSecurityAdmissionConfigurationTemplateSpec>,
    ) -> Result<(), AdmissionError> {
        let defaults = &template.spec.configuration.defaults;
        for (mode, level) in defaults.levels() {
            if !level.is_empty() && !PSA_LEVELS.iter().any(|known| *known == level) {
                return Err(AdmissionError::invalid(
                    format!("spec.configuration.defaults.{mode}"),
                    format!("invalid level {level:?}, must be one of {}", PSA_LEVELS.join(", ")),
                ));
            }
        }
        for (mode, version) in defaults.versions() {
            if !version.is_empty() && !is_valid_version(version) {
                return Err(AdmissionError::invalid(
                    format!("spec.configuration.defaults.{mode}"),
                    format!("invalid version {version:?}, must be \"latest\" or \"v<major>.<minor>\""),
                ));
            }
        }
        Ok(())
    }
}

/// `latest` or `v<major>.<minor>`
fn is_valid_version(version: &str) -> bool {
    if version == "latest" {
        return true;
    }
    let Some(numbers) = version.strip_prefix('v') else {
        return false;
    };
    match numbers.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

impl Admitter<PodSecurityAdmissionConfigurationTemplateSpec> for PodSecurityAdmissionTemplateValidator {
    fn admit(
        &self,
        request: &AdmissionRequest<'_, PodSecurityAdmissionConfigurationTemplateSpec>,
    ) -> Result<(), AdmissionError> {
        match (request.operation, request.object, request.old_object) {
            (Operation::Create | Operation::Update, Some(new), _) => self.validate(new),
            (Operation::Delete, _, Some(old)) if is_builtin_template(&old.metadata.name) => {
                Err(AdmissionError::denied(
                    KIND,
                    &old.metadata.name,
                    "cannot delete builtin template",
                ))
            }
            _ => Ok(()),
        }
    }
}
