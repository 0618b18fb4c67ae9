use cattle_management_metadata::rbac::{PolicyRule, Subject};

use crate::AdmissionError;

/// every rule must grant at least one verb
pub(crate) fn validate_rules<'a, I>(rules: I, field: &str) -> Result<(), AdmissionError>
where
    I: IntoIterator<Item = &'a PolicyRule>,
{
    for (index, rule) in rules.into_iter().enumerate() {
        if rule.verbs.is_empty() {
            return Err(AdmissionError::invalid(
                format!("{field}[{index}].verbs"),
                "at least one verb must be specified",
            ));
        }
        if rule.resources.is_empty() && rule.non_resource_urls.is_empty() {
            return Err(AdmissionError::invalid(
                format!("{field}[{index}]"),
                "rule must name resources or nonResourceURLs",
            ));
        }
    }
    Ok(())
}

/// bindings target exactly one subject
pub(crate) fn validate_single_subject(
    subjects: &[Subject],
    allowed: &str,
) -> Result<(), AdmissionError> {
    match subjects.len() {
        1 => Ok(()),
        0 => Err(AdmissionError::invalid(
            "spec",
            format!("binding must target {allowed}"),
        )),
        _ => Err(AdmissionError::invalid(
            "spec",
            format!("binding must target only one of {allowed}"),
        )),
    }
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), AdmissionError> {
    if value.is_empty() {
        Err(AdmissionError::required(field))
    } else {
        Ok(())
    }
}

pub(crate) fn unchanged<T: PartialEq>(new: &T, old: &T, field: &str) -> Result<(), AdmissionError> {
    if new == old {
        Ok(())
    } else {
        Err(AdmissionError::immutable(field))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_rules() {
        let rules = vec![
            PolicyRule::new(["get"], ["pods"]),
            PolicyRule::new(Vec::<String>::new(), ["pods"]),
        ];
        let err = validate_rules(&rules, "spec.rules").expect_err("missing verbs");
        assert_eq!(
            err,
            AdmissionError::invalid("spec.rules[1].verbs", "at least one verb must be specified")
        );

        let non_resource = PolicyRule {
            verbs: vec!["get".to_owned()],
            non_resource_urls: vec!["/metrics".to_owned()],
            ..Default::default()
        };
        assert!(validate_rules([&non_resource], "spec.rules").is_ok());
        assert!(validate_rules([&PolicyRule::new(["get"], Vec::<String>::new())], "r").is_err());
    }
}
