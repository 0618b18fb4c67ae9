use crate::k8_types::{Crd, CrdNames, Spec, Status, DefaultHeader};
use crate::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::{GROUP, V3};

use super::ClusterSpec;
use super::ClusterStatus;

pub const CLUSTER_API: Crd = Crd {
    group: GROUP,
    version: V3,
    names: CrdNames {
        kind: "Cluster",
        plural: "clusters",
        singular: "cluster",
    },
};

pub const CLUSTER_DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::from_crd(&CLUSTER_API, false);

impl Spec for ClusterSpec {
    type Status = ClusterStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &CLUSTER_API
    }
}

impl Status for ClusterStatus {}

impl ResourceSpec for ClusterSpec {
    fn descriptor() -> &'static ResourceDescriptor {
        &CLUSTER_DESCRIPTOR
    }
}
