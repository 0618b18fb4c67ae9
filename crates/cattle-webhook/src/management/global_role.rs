use cattle_management_metadata::global_role::GlobalRoleSpec;
use cattle_management_metadata::k8_types::K8Obj;

use crate::{AdmissionError, AdmissionRequest, Admitter, Operation};

use super::rules::validate_rules;

const KIND: &str = "GlobalRole";

/// Validates rules of global roles and protects builtin roles
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalRoleValidator;

impl GlobalRoleValidator {
    fn validate_spec(&self, spec: &GlobalRoleSpec) -> Result<(), AdmissionError> {
        validate_rules(&spec.rules, "spec.rules")?;
        for (namespace, rules) in &spec.namespaced_rules {
            validate_rules(rules, &format!("spec.namespacedRules[{namespace}]"))?;
        }
        Ok(())
    }

    fn validate_builtin_update(
        &self,
        new: &K8Obj<GlobalRoleSpec>,
        old: &K8Obj<GlobalRoleSpec>,
    ) -> Result<(), AdmissionError> {
        if !old.spec.builtin {
            if new.spec.builtin {
                return Err(AdmissionError::denied(
                    KIND,
                    &new.metadata.name,
                    "cannot update non-builtin GlobalRole to be builtin",
                ));
            }
            return Ok(());
        }

        // only newUserDefault may change on builtin roles
        let mut expected = old.spec.clone();
        expected.new_user_default = new.spec.new_user_default;
        if new.spec != expected {
            return Err(AdmissionError::denied(
                KIND,
                &new.metadata.name,
                "updates to builtin GlobalRoles for fields other than 'newUserDefault' are forbidden",
            ));
        }
        Ok(())
    }
}

impl Admitter<GlobalRoleSpec> for GlobalRoleValidator {
    fn admit(&self, request: &AdmissionRequest<'_, GlobalRoleSpec>) -> Result<(), AdmissionError> {
        match (request.operation, request.object, request.old_object) {
            (Operation::Create, Some(new), _) => {
                if new.spec.builtin {
                    return Err(AdmissionError::denied(
                        KIND,
                        &new.metadata.name,
                        "creating builtin GlobalRoles is not allowed",
                    ));
                }
                self.validate_spec(&new.spec)
            }
            (Operation::Update, Some(new), Some(old)) => {
                self.validate_builtin_update(new, old)?;
                self.validate_spec(&new.spec)
            }
            (Operation::Delete, _, Some(old)) if old.spec.builtin => Err(AdmissionError::denied(
                KIND,
                &old.metadata.name,
                "cannot delete builtin GlobalRoles",
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use cattle_management_metadata::rbac::PolicyRule;

    use super::*;

    fn role(name: &str, rules: Vec<PolicyRule>) -> K8Obj<GlobalRoleSpec> {
        K8Obj::new(
            name.to_owned(),
            GlobalRoleSpec {
                display_name: name.to_owned(),
                rules,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_create() {
        let validator = GlobalRoleValidator;
        let valid = role("gr-valid", vec![PolicyRule::new(["get", "list"], ["pods"])]);
        assert!(validator.admit(&AdmissionRequest::create(&valid)).is_ok());

        let missing_verbs = role("gr-invalid", vec![PolicyRule::new(Vec::<String>::new(), ["pods"])]);
        assert!(matches!(
            validator.admit(&AdmissionRequest::create(&missing_verbs)),
            Err(AdmissionError::Invalid { .. })
        ));

        let mut namespaced = role("gr-ns", vec![]);
        namespaced
            .spec
            .namespaced_rules
            .insert("fleet-default".to_owned(), vec![PolicyRule::default()]);
        let err = validator
            .admit(&AdmissionRequest::create(&namespaced))
            .expect_err("namespaced rule without verbs");
        assert_eq!(
            err,
            AdmissionError::invalid(
                "spec.namespacedRules[fleet-default][0].verbs",
                "at least one verb must be specified"
            )
        );

        let mut builtin = role("admin", vec![]);
        builtin.spec.builtin = true;
        assert!(matches!(
            validator.admit(&AdmissionRequest::create(&builtin)),
            Err(AdmissionError::Denied { .. })
        ));
    }

    #[test]
    fn test_update_builtin() {
        let validator = GlobalRoleValidator;
        let mut old = role("user", vec![PolicyRule::new(["get"], ["preferences"])]);
        old.spec.builtin = true;

        let mut new_user_default = old.clone();
        new_user_default.spec.new_user_default = true;
        assert!(
            validator
                .admit(&AdmissionRequest::update(&new_user_default, &old))
                .is_ok()
        );

        let mut renamed = old.clone();
        renamed.spec.display_name = "Standard User".to_owned();
        assert!(
            validator
                .admit(&AdmissionRequest::update(&renamed, &old))
                .is_err()
        );

        let plain = role("plain", vec![]);
        let mut promoted = plain.clone();
        promoted.spec.builtin = true;
        assert!(
            validator
                .admit(&AdmissionRequest::update(&promoted, &plain))
                .is_err()
        );
    }

    #[test]
    fn test_delete() {
        let validator = GlobalRoleValidator;
        let mut builtin = role("admin", vec![]);
        builtin.spec.builtin = true;
        assert!(validator.admit(&AdmissionRequest::delete(&builtin)).is_err());
        assert!(
            validator
                .admit(&AdmissionRequest::delete(&role("custom", vec![])))
                .is_ok()
        );
    }
}
