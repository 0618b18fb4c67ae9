//!
//! # Lifecycle endpoint validation
//!
//! Drives create, update and delete of one kind and checks that valid
//! payloads are accepted and invalid ones rejected.
//!
use anyhow::{Context, Result, bail};
use tracing::{debug, instrument};

use cattle_controller::k8_types::K8Obj;
use cattle_controller::metadata::ResourceSpec;
use cattle_controller::{Controller, MetadataClient};

pub type Constructor<S> = Box<dyn Fn() -> K8Obj<S> + Send + Sync>;

/// derives a payload from the object as created
pub type Mutation<S> = Box<dyn Fn(K8Obj<S>) -> K8Obj<S> + Send + Sync>;

/// Payloads for one kind. Absent payloads skip their step.
pub struct EndPointObjs<S: ResourceSpec> {
    pub invalid_create: Option<Constructor<S>>,
    /// empty receptacle for the created object; its contents are overwritten
    /// by the server's copy, so only the type matters
    pub new_obj: Constructor<S>,
    pub valid_create_obj: K8Obj<S>,
    pub invalid_update: Option<Mutation<S>>,
    pub valid_update: Option<Mutation<S>>,
    pub valid_delete: Option<Constructor<S>>,
}

impl<S: ResourceSpec> EndPointObjs<S> {
    /// only create and cleanup
    pub fn new(valid_create_obj: K8Obj<S>) -> Self {
        Self {
            invalid_create: None,
            new_obj: Box::new(|| K8Obj::new(String::new(), S::default())),
            valid_create_obj,
            invalid_update: None,
            valid_update: None,
            valid_delete: None,
        }
    }
}

/// Runs create, update and delete steps in order.
/// Returns on first step whose outcome differs from expectation.
#[instrument(skip(endpoints, controller), fields(kind = S::descriptor().kind()))]
pub async fn validate_endpoints<S, C>(
    endpoints: &EndPointObjs<S>,
    controller: &Controller<S, C>,
) -> Result<()>
where
    S: ResourceSpec,
    C: MetadataClient,
{
    let kind = controller.descriptor().kind();

    if let Some(invalid_create) = &endpoints.invalid_create {
        let obj = invalid_create();
        let name = obj.metadata.name.clone();
        match controller.create(obj).await {
            Ok(_) => bail!("{kind}: invalid create of {name:?} succeeded, expected rejection"),
            Err(err) => debug!(%err, "invalid create rejected"),
        }
    }

    let created = controller
        .create(endpoints.valid_create_obj.clone())
        .await
        .with_context(|| {
            format!(
                "{kind}: valid create of {:?} failed, expected success",
                endpoints.valid_create_obj.metadata.name
            )
        })?;

    let mut current = (endpoints.new_obj)();
    current.clone_from(&created);
    let namespace = current.metadata.namespace.clone();
    let name = current.metadata.name.clone();
    debug!(%name, rev = %current.metadata.resource_version, "created");

    if let Some(invalid_update) = &endpoints.invalid_update {
        let obj = invalid_update(current.clone());
        if controller.update(obj).await.is_ok() {
            bail!("{kind}: invalid update of {name:?} succeeded, expected rejection");
        }
        debug!(%name, "invalid update rejected");
    }

    if let Some(valid_update) = &endpoints.valid_update {
        let obj = valid_update(current.clone());
        current = controller.update(obj).await.with_context(|| {
            format!("{kind}: valid update of {name:?} failed, expected success")
        })?;
        debug!(%name, rev = %current.metadata.resource_version, "updated");
    }

    match &endpoints.valid_delete {
        Some(valid_delete) => {
            let obj = valid_delete();
            let delete_namespace = if obj.metadata.namespace.is_empty() {
                namespace
            } else {
                obj.metadata.namespace.clone()
            };
            let delete_name = obj.metadata.name;
            controller
                .delete(&delete_namespace, &delete_name)
                .await
                .with_context(|| {
                    format!("{kind}: valid delete of {delete_name:?} failed, expected success")
                })?;

            match controller.get(&delete_namespace, &delete_name).await {
                Ok(_) => bail!("{kind}: {delete_name:?} still retrievable after delete"),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("{kind}: get after delete of {delete_name:?} failed, expected not found")
                    });
                }
            }
        }
        None => {
            controller
                .delete(&namespace, &name)
                .await
                .with_context(|| format!("{kind}: cleanup of {name:?} failed"))?;
        }
    }

    Ok(())
}
