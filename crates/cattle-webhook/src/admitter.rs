use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use cattle_management_metadata::{GroupVersionKind, ResourceSpec};

use crate::{AdmissionError, AdmissionRequest};

/// Validate writes of one resource kind
pub trait Admitter<S>: Send + Sync
where
    S: ResourceSpec,
{
    fn admit(&self, request: &AdmissionRequest<'_, S>) -> Result<(), AdmissionError>;
}

impl<S, F> Admitter<S> for F
where
    S: ResourceSpec,
    F: Fn(&AdmissionRequest<'_, S>) -> Result<(), AdmissionError> + Send + Sync,
{
    fn admit(&self, request: &AdmissionRequest<'_, S>) -> Result<(), AdmissionError> {
        self(request)
    }
}

/// Admitters keyed by kind.
/// Each entry holds an `Arc<dyn Admitter<S>>` for the spec of that kind.
#[derive(Default, Clone)]
pub struct AdmissionRegistry {
    admitters: HashMap<GroupVersionKind, Arc<dyn Any + Send + Sync>>,
}

impl fmt::Debug for AdmissionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.admitters.keys()).finish()
    }
}

impl AdmissionRegistry {
    /// register admitter for spec, replacing existing one
    pub fn register<S, A>(&mut self, admitter: A)
    where
        S: ResourceSpec,
        A: Admitter<S> + 'static,
    {
        let gvk = S::descriptor().gvk;
        debug!(%gvk, "registering admitter");
        let admitter: Arc<dyn Admitter<S>> = Arc::new(admitter);
        self.admitters.insert(gvk, Arc::new(admitter));
    }

    pub fn admitter<S>(&self) -> Option<Arc<dyn Admitter<S>>>
    where
        S: ResourceSpec,
    {
        self.admitters
            .get(&S::descriptor().gvk)
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Admitter<S>>>())
            .cloned()
    }

    pub fn contains(&self, gvk: &GroupVersionKind) -> bool {
        self.admitters.contains_key(gvk)
    }

    pub fn len(&self) -> usize {
        self.admitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitters.is_empty()
    }

    /// run admitter for request, writes of kinds without admitter are allowed
    pub fn review<S>(&self, request: &AdmissionRequest<'_, S>) -> Result<(), AdmissionError>
    where
        S: ResourceSpec,
    {
        let Some(admitter) = self.admitter::<S>() else {
            trace!(kind = S::descriptor().kind(), "no admitter, allowed");
            return Ok(());
        };

        let result = admitter.admit(request);
        match &result {
            Ok(_) => trace!(
                kind = S::descriptor().kind(),
                name = request.name(),
                %request.operation,
                "admitted"
            ),
            Err(err) => debug!(
                kind = S::descriptor().kind(),
                name = request.name(),
                %request.operation,
                %err,
                "rejected"
            ),
        }
        result
    }
}
