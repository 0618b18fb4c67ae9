use crate::k8_types::{Crd, CrdNames, Spec, Status, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::GlobalRoleSpec;
use super::GlobalRoleStatus;

pub const GLOBAL_ROLE_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "GlobalRole",
        plural: "globalroles",
        singular: "globalrole",
    },
};

pub const GLOBAL_ROLE_DESCRIPTOR: ResourceDescriptor =
    ResourceDescriptor::from_crd(&GLOBAL_ROLE_API, false);

impl Spec for GlobalRoleSpec {
    type Status = GlobalRoleStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &GLOBAL_ROLE_API
    }
}

impl Status for GlobalRoleStatus {}

impl ResourceSpec for GlobalRoleSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &GLOBAL_ROLE_DESCRIPTOR
    }
}

#[cfg(test)]
mod test_v3_spec {
    use crate::k8_types::K8Obj;

    use super::GlobalRoleSpec;

    #[test]
    fn read_k8_global_role_json() {
        let data = r#"{
  "apiVersion": "management.cattle.io/v3",
  "kind": "GlobalRole",
  "metadata": { "name": "gr-read" },
  "spec": {
    "displayName": "Read clusters",
    "rules": [ { "verbs": ["get", "list"], "apiGroups": ["management.cattle.io"], "resources": ["clusters"] } ],
    "namespacedRules": { "fleet-default": [ { "verbs": ["get"], "resources": ["secrets"] } ] }
  }
}"#;
        let role: K8Obj<GlobalRoleSpec> = serde_json::from_str(data).expect("parse global role");
        assert_eq!(role.metadata.name, "gr-read");
        assert_eq!(role.spec.display_name, "Read clusters");
        assert_eq!(role.spec.all_rules().count(), 2);
        assert!(!role.spec.builtin);
    }
}
