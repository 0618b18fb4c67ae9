//!
//! # In-memory metadata client
//!
//! Keeps objects as yaml values, one store per kind. Every write passes
//! through the admission registry before it is stored, then is fanned out
//! to the watchers of that kind.
//!
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_channel::{Receiver, Sender, unbounded};
use async_lock::{Mutex, RwLock};
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use serde_yaml::Value;
use tracing::{debug, trace};
use uuid::Uuid;

use cattle_management_metadata::{GroupVersionKind, ResourceDescriptor, ResourceSpec};
use cattle_webhook::{AdmissionRegistry, AdmissionRequest, register_management_v3};
use k8_types::{K8Obj, K8Watch, ObjectMeta};

use crate::ClientError;

use super::{MetadataClient, NameSpace, WatchResult};

#[derive(Debug)]
struct Watcher {
    namespace: NameSpace,
    sender: Sender<Value>,
}

#[derive(Debug)]
struct SpecStore {
    descriptor: &'static ResourceDescriptor,
    data: RwLock<HashMap<String, Value>>,
    watchers: Mutex<Vec<Watcher>>,
}

impl SpecStore {
    fn new(descriptor: &'static ResourceDescriptor) -> Self {
        Self {
            descriptor,
            data: RwLock::new(HashMap::new()),
            watchers: Mutex::new(vec![]),
        }
    }

    async fn get<S: ResourceSpec>(&self, key: &str) -> Result<Option<K8Obj<S>>, ClientError> {
        let lock = self.data.read().await;
        let Some(value) = lock.get(key) else {
            return Ok(None);
        };

        let output = value.clone();
        drop(lock);

        Ok(serde_yaml::from_value(output)?)
    }

    async fn items<S: ResourceSpec>(
        &self,
        namespace: &NameSpace,
    ) -> Result<Vec<K8Obj<S>>, ClientError> {
        let lock = self.data.read().await;
        let mut items = lock
            .values()
            .map(|value| serde_yaml::from_value::<K8Obj<S>>(value.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        drop(lock);

        items.retain(|item| namespace.matches(&item.metadata.namespace));
        items.sort_by(|a, b| {
            (&a.metadata.namespace, &a.metadata.name).cmp(&(&b.metadata.namespace, &b.metadata.name))
        });
        Ok(items)
    }

    async fn subscribe(&self, namespace: &NameSpace) -> Receiver<Value> {
        let (sender, receiver) = unbounded();
        let mut watchers = self.watchers.lock().await;
        watchers.push(Watcher {
            namespace: namespace.clone(),
            sender,
        });
        debug!(kind = self.descriptor.kind(), watchers = watchers.len(), "subscribed");
        receiver
    }

    /// send to every live watcher, closed ones are dropped
    async fn notify<S: ResourceSpec>(&self, event: K8Watch<S>) -> Result<(), ClientError> {
        let namespace = match &event {
            K8Watch::ADDED(obj) | K8Watch::MODIFIED(obj) | K8Watch::DELETED(obj) => {
                obj.metadata.namespace.clone()
            }
        };
        let value = serde_yaml::to_value(event)?;

        let mut watchers = self.watchers.lock().await;
        watchers.retain(|watcher| !watcher.sender.is_closed());
        for watcher in watchers.iter().filter(|w| w.namespace.matches(&namespace)) {
            // unbounded, only fails once receiver is gone
            let _ = watcher.sender.try_send(value.clone());
        }
        trace!(kind = self.descriptor.kind(), watchers = watchers.len(), "notified");
        Ok(())
    }
}

/// In-memory replacement of the management API server
#[derive(Debug)]
pub struct MemoryClient {
    stores: Mutex<HashMap<GroupVersionKind, Arc<SpecStore>>>,
    admission: AdmissionRegistry,
    revision: AtomicU64,
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::with_admission(AdmissionRegistry::default())
    }
}

impl MemoryClient {
    /// client without admission, every write is accepted
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_admission(admission: AdmissionRegistry) -> Self {
        Self {
            stores: Mutex::new(HashMap::new()),
            admission,
            revision: AtomicU64::new(0),
        }
    }

    /// client enforcing the management v3 validators
    pub fn with_management_admission() -> Arc<Self> {
        let mut registry = AdmissionRegistry::default();
        register_management_v3(&mut registry);
        Arc::new(Self::with_admission(registry))
    }

    pub fn admission(&self) -> &AdmissionRegistry {
        &self.admission
    }

    /// live watchers of a kind, closed ones are pruned on next write
    pub async fn watcher_count<S: ResourceSpec>(&self) -> usize {
        let store = self.get_store::<S>().await;
        store.watchers.lock().await.len()
    }

    async fn get_store<S: ResourceSpec>(&self) -> Arc<SpecStore> {
        let descriptor = S::descriptor();
        let mut stores = self.stores.lock().await;
        stores
            .entry(descriptor.gvk)
            .or_insert_with(|| Arc::new(SpecStore::new(descriptor)))
            .clone()
    }

    fn next_revision(&self) -> String {
        (self.revision.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    /// checks name and scope, returns store key
    fn normalize<S: ResourceSpec>(metadata: &mut ObjectMeta) -> Result<String, ClientError> {
        let descriptor = S::descriptor();
        if metadata.name.is_empty() {
            return Err(ClientError::Invalid {
                kind: descriptor.kind(),
                reason: "metadata.name: Required value: name is required".to_owned(),
            });
        }
        if descriptor.namespaced {
            if metadata.namespace.is_empty() {
                return Err(ClientError::Invalid {
                    kind: descriptor.kind(),
                    reason: "metadata.namespace: Required value".to_owned(),
                });
            }
        } else {
            metadata.namespace.clear();
        }
        Ok(Self::key_of(descriptor, &metadata.namespace, &metadata.name))
    }

    fn key_of(descriptor: &ResourceDescriptor, namespace: &str, name: &str) -> String {
        if descriptor.namespaced {
            format!("{namespace}/{name}")
        } else {
            name.to_owned()
        }
    }

    fn not_found<S: ResourceSpec>(key: String) -> ClientError {
        ClientError::NotFound {
            kind: S::descriptor().kind(),
            name: key,
        }
    }

    fn check_version<S: ResourceSpec>(
        key: &str,
        new: &ObjectMeta,
        old: &ObjectMeta,
    ) -> Result<(), ClientError> {
        if !new.resource_version.is_empty() && new.resource_version != old.resource_version {
            return Err(ClientError::Conflict {
                kind: S::descriptor().kind(),
                name: key.to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataClient for MemoryClient {
    async fn retrieve_item<S>(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec,
    {
        let descriptor = S::descriptor();
        let key = Self::key_of(descriptor, namespace, name);
        let store = self.get_store::<S>().await;

        store
            .get::<S>(&key)
            .await?
            .ok_or_else(|| Self::not_found::<S>(key))
    }

    async fn retrieve_items<S>(&self, namespace: &NameSpace) -> Result<Vec<K8Obj<S>>, ClientError>
    where
        S: ResourceSpec,
    {
        let store = self.get_store::<S>().await;
        if S::descriptor().namespaced {
            store.items(namespace).await
        } else {
            store.items(&NameSpace::All).await
        }
    }

    async fn create_item<S>(&self, mut value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec,
    {
        let key = Self::normalize::<S>(&mut value.metadata)?;
        value.api_version = S::api_version();
        value.kind = S::kind();

        self.admission.review(&AdmissionRequest::create(&value))?;

        let store = self.get_store::<S>().await;
        let mut lock = store.data.write().await;
        if lock.contains_key(&key) {
            return Err(ClientError::AlreadyExists {
                kind: S::descriptor().kind(),
                name: key,
            });
        }

        value.metadata.uid = Uuid::new_v4().to_string();
        value.metadata.resource_version = self.next_revision();
        debug!(%key, kind = S::descriptor().kind(), rev = %value.metadata.resource_version, "created");

        lock.insert(key, serde_yaml::to_value(&value)?);
        // notified under the write lock so events follow revision order
        store.notify(K8Watch::ADDED(value.clone())).await?;
        drop(lock);

        Ok(value)
    }

    async fn update_item<S>(&self, mut value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec,
    {
        let key = Self::normalize::<S>(&mut value.metadata)?;
        value.api_version = S::api_version();
        value.kind = S::kind();

        let store = self.get_store::<S>().await;
        let mut lock = store.data.write().await;
        let old: K8Obj<S> = match lock.get(&key) {
            Some(old) => serde_yaml::from_value(old.clone())?,
            None => return Err(Self::not_found::<S>(key)),
        };
        Self::check_version::<S>(&key, &value.metadata, &old.metadata)?;

        value.metadata.uid = old.metadata.uid.clone();
        value.status = old.status.clone();

        self.admission
            .review(&AdmissionRequest::update(&value, &old))?;

        value.metadata.resource_version = self.next_revision();
        debug!(%key, kind = S::descriptor().kind(), rev = %value.metadata.resource_version, "updated");

        lock.insert(key, serde_yaml::to_value(&value)?);
        store.notify(K8Watch::MODIFIED(value.clone())).await?;
        drop(lock);

        Ok(value)
    }

    async fn update_status<S>(&self, mut value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec,
    {
        let key = Self::normalize::<S>(&mut value.metadata)?;

        let store = self.get_store::<S>().await;
        let mut lock = store.data.write().await;
        let mut stored: K8Obj<S> = match lock.get(&key) {
            Some(old) => serde_yaml::from_value(old.clone())?,
            None => return Err(Self::not_found::<S>(key)),
        };
        Self::check_version::<S>(&key, &value.metadata, &stored.metadata)?;

        stored.status = value.status;
        stored.metadata.resource_version = self.next_revision();
        debug!(%key, kind = S::descriptor().kind(), rev = %stored.metadata.resource_version, "status updated");

        lock.insert(key, serde_yaml::to_value(&stored)?);
        store.notify(K8Watch::MODIFIED(stored.clone())).await?;
        drop(lock);

        Ok(stored)
    }

    async fn delete_item<S>(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec,
    {
        let key = Self::key_of(S::descriptor(), namespace, name);

        let store = self.get_store::<S>().await;
        let mut lock = store.data.write().await;
        let old: K8Obj<S> = match lock.get(&key) {
            Some(old) => serde_yaml::from_value(old.clone())?,
            None => return Err(Self::not_found::<S>(key)),
        };

        self.admission.review(&AdmissionRequest::delete(&old))?;

        lock.remove(&key);
        debug!(%key, kind = S::descriptor().kind(), "deleted");
        store.notify(K8Watch::DELETED(old.clone())).await?;
        drop(lock);

        Ok(old)
    }

    async fn watch_stream<S>(
        &self,
        namespace: &NameSpace,
    ) -> Result<BoxStream<'static, WatchResult<S>>, ClientError>
    where
        S: ResourceSpec,
    {
        let namespace = if S::descriptor().namespaced {
            namespace.clone()
        } else {
            NameSpace::All
        };
        let store = self.get_store::<S>().await;
        let receiver = store.subscribe(&namespace).await;

        Ok(receiver
            .map(|value| serde_yaml::from_value::<K8Watch<S>>(value).map_err(ClientError::from))
            .boxed())
    }
}

#[cfg(test)]
mod test {
    use futures_util::StreamExt;

    use cattle_management_metadata::cluster_role_template_binding::ClusterRoleTemplateBindingSpec;
    use cattle_management_metadata::global_role::{GlobalRoleSpec, GlobalRoleStatus};
    use cattle_management_metadata::rbac::PolicyRule;
    use k8_types::{K8Obj, K8Watch};

    use cattle_webhook::{AdmissionError, AdmissionRegistry, AdmissionRequest, Operation};

    use crate::ClientError;
    use crate::client::{MetadataClient, NameSpace};

    use super::MemoryClient;

    fn global_role(name: &str) -> K8Obj<GlobalRoleSpec> {
        K8Obj::new(
            name.to_owned(),
            GlobalRoleSpec {
                display_name: "Test".to_owned(),
                rules: vec![PolicyRule::new(["get"], ["pods"])],
                ..Default::default()
            },
        )
    }

    fn crtb(namespace: &str, name: &str) -> K8Obj<ClusterRoleTemplateBindingSpec> {
        let mut obj = K8Obj::new(
            name.to_owned(),
            ClusterRoleTemplateBindingSpec {
                user_name: "u-abc".to_owned(),
                cluster_name: namespace.to_owned(),
                role_template_name: "cluster-owner".to_owned(),
                ..Default::default()
            },
        );
        obj.metadata.namespace = namespace.to_owned();
        obj
    }

    #[fluvio_future::test]
    async fn test_crud_and_watch() {
        let client = MemoryClient::new_shared();
        let mut stream = client
            .watch_stream::<GlobalRoleSpec>(&NameSpace::All)
            .await
            .expect("watch");

        // create
        let created = client.create_item(global_role("gr-1")).await.expect("create");
        assert!(!created.metadata.uid.is_empty());
        assert_eq!(created.kind, "GlobalRole");
        assert_eq!(created.api_version, "management.cattle.io/v3");

        let K8Watch::ADDED(added) = stream.next().await.expect("event").expect("ok") else {
            panic!("expected added");
        };
        assert_eq!(added.metadata.name, "gr-1");

        assert!(matches!(
            client.create_item(global_role("gr-1")).await,
            Err(ClientError::AlreadyExists { .. })
        ));

        // status is kept by update
        let mut status_update = created.clone();
        status_update.status = GlobalRoleStatus {
            summary: "Completed".to_owned(),
            ..Default::default()
        };
        let with_status = client.update_status(status_update).await.expect("status");
        assert_eq!(with_status.status.summary, "Completed");
        assert!(matches!(stream.next().await, Some(Ok(K8Watch::MODIFIED(_)))));

        let mut update = with_status.clone();
        update.spec.description = "changed".to_owned();
        update.status = GlobalRoleStatus::default();
        let updated = client.update_item(update).await.expect("update");
        assert_eq!(updated.spec.description, "changed");
        assert_eq!(updated.status.summary, "Completed");
        assert_eq!(updated.metadata.uid, created.metadata.uid);
        assert_ne!(updated.metadata.resource_version, with_status.metadata.resource_version);
        assert!(matches!(stream.next().await, Some(Ok(K8Watch::MODIFIED(_)))));

        // stale resource version
        assert!(
            client
                .update_item(with_status)
                .await
                .expect_err("stale")
                .is_conflict()
        );

        // delete
        client
            .delete_item::<GlobalRoleSpec>("", "gr-1")
            .await
            .expect("delete");
        assert!(matches!(stream.next().await, Some(Ok(K8Watch::DELETED(_)))));
        assert!(
            client
                .retrieve_item::<GlobalRoleSpec>("", "gr-1")
                .await
                .expect_err("gone")
                .is_not_found()
        );
        assert!(
            client
                .delete_item::<GlobalRoleSpec>("", "gr-1")
                .await
                .expect_err("gone")
                .is_not_found()
        );
    }

    #[fluvio_future::test]
    async fn test_scope() {
        let client = MemoryClient::new_shared();

        // cluster scoped kinds drop namespace
        let mut role = global_role("gr-scoped");
        role.metadata.namespace = "ignored".to_owned();
        let created = client.create_item(role).await.expect("create");
        assert!(created.metadata.namespace.is_empty());
        client
            .retrieve_item::<GlobalRoleSpec>("other", "gr-scoped")
            .await
            .expect("namespace ignored on lookup");

        // namespaced kinds require one
        assert!(
            client
                .create_item(crtb("", "crtb-1"))
                .await
                .expect_err("no namespace")
                .is_rejected()
        );

        let mut stream = client
            .watch_stream::<ClusterRoleTemplateBindingSpec>(&NameSpace::from("c-1"))
            .await
            .expect("watch");

        client.create_item(crtb("c-2", "crtb-1")).await.expect("create");
        client.create_item(crtb("c-1", "crtb-1")).await.expect("same name other namespace");

        let K8Watch::ADDED(added) = stream.next().await.expect("event").expect("ok") else {
            panic!("expected added");
        };
        assert_eq!(added.metadata.namespace, "c-1");

        let all = client
            .retrieve_items::<ClusterRoleTemplateBindingSpec>(&NameSpace::All)
            .await
            .expect("list");
        assert_eq!(all.len(), 2);
        let c2 = client
            .retrieve_items::<ClusterRoleTemplateBindingSpec>(&NameSpace::from("c-2"))
            .await
            .expect("list");
        assert_eq!(c2.len(), 1);
        assert_eq!(c2[0].metadata.namespace, "c-2");
    }

    #[fluvio_future::test]
    async fn test_admission() {
        let client = MemoryClient::with_management_admission();

        let mut builtin = global_role("admin");
        builtin.spec.builtin = true;
        let err = client.create_item(builtin).await.expect_err("builtin denied");
        assert!(matches!(err, ClientError::Admission(_)));

        let mut no_verbs = global_role("gr-bad");
        no_verbs.spec.rules = vec![PolicyRule::new(Vec::<String>::new(), ["pods"])];
        assert!(client.create_item(no_verbs).await.expect_err("invalid").is_rejected());

        // nothing stored on rejection
        assert!(
            client
                .retrieve_items::<GlobalRoleSpec>(&NameSpace::All)
                .await
                .expect("list")
                .is_empty()
        );

        client.create_item(global_role("gr-ok")).await.expect("valid");
    }

    #[fluvio_future::test]
    async fn test_update_status_checks_version_and_skips_admission() {
        // spec updates are always denied, status updates never reviewed
        let mut registry = AdmissionRegistry::default();
        registry.register::<GlobalRoleSpec, _>(
            |request: &AdmissionRequest<'_, GlobalRoleSpec>| match request.operation {
                Operation::Update => Err(AdmissionError::denied(
                    "GlobalRole",
                    request.name(),
                    "frozen",
                )),
                _ => Ok(()),
            },
        );
        let client = MemoryClient::with_admission(registry);

        let created = client.create_item(global_role("gr-frozen")).await.expect("create");

        let mut update = created.clone();
        update.spec.description = "changed".to_owned();
        assert!(matches!(
            client.update_item(update).await,
            Err(ClientError::Admission(_))
        ));

        let mut status_update = created.clone();
        status_update.status.summary = "Completed".to_owned();
        let with_status = client
            .update_status(status_update.clone())
            .await
            .expect("status is not reviewed");
        assert_eq!(with_status.status.summary, "Completed");
        assert_eq!(with_status.spec, created.spec);

        // still carries the version read at creation
        assert!(
            client
                .update_status(status_update)
                .await
                .expect_err("stale")
                .is_conflict()
        );
    }

    #[fluvio_future::test]
    async fn test_closed_watchers_are_pruned() {
        let client = MemoryClient::new_shared();

        let mut kept = client
            .watch_stream::<GlobalRoleSpec>(&NameSpace::All)
            .await
            .expect("watch");
        let dropped = client
            .watch_stream::<GlobalRoleSpec>(&NameSpace::All)
            .await
            .expect("watch");
        assert_eq!(client.watcher_count::<GlobalRoleSpec>().await, 2);

        drop(dropped);
        client.create_item(global_role("gr-1")).await.expect("create");

        assert_eq!(client.watcher_count::<GlobalRoleSpec>().await, 1);
        assert!(matches!(kept.next().await, Some(Ok(K8Watch::ADDED(_)))));
    }
}
