//!
//! # Typed controller
//!
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tracing::debug;

use cattle_management_metadata::{GroupVersionKind, ResourceDescriptor, ResourceSpec};
use k8_types::K8Obj;

use crate::ClientError;
use crate::client::{MetadataClient, NameSpace, ObjectKey};
use crate::factory::{SharedController, SharedControllerFactory, SharedHandler};

/// Controller of one kind, backed by the kind's shared controller.
/// Cheap to clone; clones share queue and handlers.
pub struct Controller<S, C> {
    descriptor: ResourceDescriptor,
    factory: Arc<SharedControllerFactory<C>>,
    shared: Arc<SharedController>,
    data: PhantomData<fn() -> S>,
}

impl<S, C> Clone for Controller<S, C> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            factory: self.factory.clone(),
            shared: self.shared.clone(),
            data: PhantomData,
        }
    }
}

impl<S, C> fmt::Debug for Controller<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl<S, C> Controller<S, C>
where
    S: ResourceSpec,
    C: MetadataClient,
{
    pub fn new(
        gvk: GroupVersionKind,
        plural: &'static str,
        namespaced: bool,
        factory: Arc<SharedControllerFactory<C>>,
    ) -> Self {
        let descriptor = ResourceDescriptor::new(gvk, plural, namespaced);
        let shared = factory.for_descriptor(&descriptor);
        Self {
            descriptor,
            factory,
            shared,
            data: PhantomData,
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        self.descriptor.gvk
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn factory(&self) -> &Arc<SharedControllerFactory<C>> {
        &self.factory
    }

    pub fn shared(&self) -> &Arc<SharedController> {
        &self.shared
    }

    pub async fn create(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, ClientError> {
        self.factory.client().create_item(obj).await
    }

    pub async fn update(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, ClientError> {
        self.factory.client().update_item(obj).await
    }

    pub async fn update_status(&self, obj: K8Obj<S>) -> Result<K8Obj<S>, ClientError> {
        self.factory.client().update_status(obj).await
    }

    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.factory
            .client()
            .delete_item::<S>(namespace, name)
            .await
            .map(|_| ())
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, ClientError> {
        self.factory.client().retrieve_item(namespace, name).await
    }

    /// objects in `namespace`, every namespace if empty
    pub async fn list(&self, namespace: &str) -> Result<Vec<K8Obj<S>>, ClientError> {
        self.factory
            .client()
            .retrieve_items(&NameSpace::from(namespace))
            .await
    }

    pub fn enqueue(&self, namespace: &str, name: &str) {
        self.shared.enqueue(self.key(namespace, name));
    }

    pub fn enqueue_after(&self, namespace: &str, name: &str, delay: Duration) {
        self.shared.enqueue_after(self.key(namespace, name), delay);
    }

    fn key(&self, namespace: &str, name: &str) -> ObjectKey {
        if self.descriptor.namespaced {
            ObjectKey::new(namespace, name)
        } else {
            ObjectKey::cluster_scoped(name)
        }
    }

    /// Register handler called with current object on every change,
    /// or with `None` once the object is gone.
    pub async fn on_change<F, Fut>(&self, name: &str, handler: F)
    where
        F: Fn(ObjectKey, Option<K8Obj<S>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let client = self.factory.client().clone();
        let handler = Arc::new(handler);
        let shared_handler: SharedHandler = Arc::new(move |key: ObjectKey| {
            let client = client.clone();
            let handler = handler.clone();
            async move {
                let obj = match client.retrieve_item::<S>(&key.namespace, &key.name).await {
                    Ok(obj) => Some(obj),
                    Err(err) if err.is_not_found() => None,
                    Err(err) => return Err(anyhow::Error::from(err)),
                };
                handler(key, obj).await
            }
            .boxed()
        });

        debug!(kind = self.descriptor.kind(), name, "on change");
        self.shared.register_handler(name, shared_handler).await;
        self.factory.watch::<S>(&self.shared);
        self.factory.start_controller(&self.shared);
    }

    /// Register handler called once the object is gone
    pub async fn on_remove<F, Fut>(&self, name: &str, handler: F)
    where
        F: Fn(ObjectKey) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.on_change(name, move |key, obj: Option<K8Obj<S>>| {
            let handler = handler.clone();
            async move {
                match obj {
                    Some(_) => Ok(()),
                    None => handler(key).await,
                }
            }
        })
        .await;
    }
}
