use std::fmt;

use cattle_management_metadata::k8_types::{K8Obj, Spec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Write under review.
/// `object` is absent on delete, `old_object` is absent on create.
#[derive(Debug)]
pub struct AdmissionRequest<'a, S>
where
    S: Spec,
{
    pub operation: Operation,
    pub object: Option<&'a K8Obj<S>>,
    pub old_object: Option<&'a K8Obj<S>>,
}

impl<'a, S> AdmissionRequest<'a, S>
where
    S: Spec,
{
    pub fn create(object: &'a K8Obj<S>) -> Self {
        Self {
            operation: Operation::Create,
            object: Some(object),
            old_object: None,
        }
    }

    pub fn update(object: &'a K8Obj<S>, old_object: &'a K8Obj<S>) -> Self {
        Self {
            operation: Operation::Update,
            object: Some(object),
            old_object: Some(old_object),
        }
    }

    pub fn delete(old_object: &'a K8Obj<S>) -> Self {
        Self {
            operation: Operation::Delete,
            object: None,
            old_object: Some(old_object),
        }
    }

    /// name of the object under review
    pub fn name(&self) -> &str {
        self.object
            .or(self.old_object)
            .map(|obj| obj.metadata.name.as_str())
            .unwrap_or_default()
    }
}
