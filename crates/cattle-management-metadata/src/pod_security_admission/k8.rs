use crate::k8_types::{Crd, CrdNames, Spec, Status, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::PodSecurityAdmissionConfigurationTemplateSpec;
use super::PodSecurityAdmissionConfigurationTemplateStatus;

pub const PSA_TEMPLATE_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "PodSecurityAdmissionConfigurationTemplate",
        plural: "podsecurityadmissionconfigurationtemplates",
        singular: "podsecurityadmissionconfigurationtemplate",
    },
};

pub const PSA_TEMPLATE_DESCRIPTOR: ResourceDescriptor =
    ResourceDescriptor::from_crd(&PSA_TEMPLATE_API, false);

impl Spec for PodSecurityAdmissionConfigurationTemplateSpec {
    type Status = PodSecurityAdmissionConfigurationTemplateStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &PSA_TEMPLATE_API
    }
}

impl Status for PodSecurityAdmissionConfigurationTemplateStatus {}

impl ResourceSpec for PodSecurityAdmissionConfigurationTemplateSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &PSA_TEMPLATE_DESCRIPTOR
    }
}

#[cfg(test)]
mod test_v3_spec {
    use crate::k8_types::K8Obj;

    use super::PodSecurityAdmissionConfigurationTemplateSpec;

    #[test]
    fn read_k8_psact_json() {
        let data = r#"{
  "metadata": { "name": "rancher-restricted" },
  "spec": {
    "description": "restricted",
    "configuration": {
      "defaults": { "enforce": "restricted", "enforceVersion": "latest" },
      "exemptions": { "namespaces": ["kube-system", "cattle-system"] }
    }
  }
}"#;
        let template: K8Obj<PodSecurityAdmissionConfigurationTemplateSpec> =
            serde_json::from_str(data).expect("parse template");
        let defaults = &template.spec.configuration.defaults;
        assert_eq!(defaults.levels()[0], ("enforce", "restricted"));
        assert_eq!(defaults.audit, "");
        assert_eq!(template.spec.configuration.exemptions.namespaces.len(), 2);
    }
}
