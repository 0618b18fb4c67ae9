//!
//! # Metadata client
//!
//! Typed CRUD and watch access to management resources.
//!
pub mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use cattle_management_metadata::ResourceSpec;
use k8_types::{K8Obj, K8Watch};

use crate::ClientError;

pub type SharedClient<C> = Arc<C>;

pub type WatchResult<S> = Result<K8Watch<S>, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NameSpace {
    #[default]
    All,
    Named(String),
}

impl NameSpace {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn named(&self) -> &str {
        match self {
            Self::All => "",
            Self::Named(name) => name,
        }
    }

    /// true if object in `namespace` is visible through this scope
    pub fn matches(&self, namespace: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == namespace,
        }
    }
}

impl From<&str> for NameSpace {
    fn from(namespace: &str) -> Self {
        if namespace.is_empty() {
            Self::All
        } else {
            Self::Named(namespace.to_owned())
        }
    }
}

impl From<String> for NameSpace {
    fn from(namespace: String) -> Self {
        if namespace.is_empty() {
            Self::All
        } else {
            Self::Named(namespace)
        }
    }
}

/// Work queue key of an object. Namespace is empty for cluster scoped kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self::new("", name)
    }

    pub fn of<S: ResourceSpec>(obj: &K8Obj<S>) -> Self {
        Self::new(obj.metadata.namespace.clone(), obj.metadata.name.clone())
    }

    pub fn of_watch<S: ResourceSpec>(event: &K8Watch<S>) -> Self {
        match event {
            K8Watch::ADDED(obj) | K8Watch::MODIFIED(obj) | K8Watch::DELETED(obj) => Self::of(obj),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

/// Access to stored objects of every management kind.
///
/// The namespace argument is ignored for cluster scoped kinds.
#[async_trait]
pub trait MetadataClient: Send + Sync + 'static {
    /// retrieval a single item
    async fn retrieve_item<S>(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec;

    async fn retrieve_items<S>(&self, namespace: &NameSpace) -> Result<Vec<K8Obj<S>>, ClientError>
    where
        S: ResourceSpec;

    /// create new object, admission runs before it is stored
    async fn create_item<S>(&self, value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec;

    /// replace spec and metadata of existing object, status is preserved
    async fn update_item<S>(&self, value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec;

    /// replace status of existing object, spec is preserved
    async fn update_status<S>(&self, value: K8Obj<S>) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec;

    /// delete object and return last stored version
    async fn delete_item<S>(&self, namespace: &str, name: &str) -> Result<K8Obj<S>, ClientError>
    where
        S: ResourceSpec;

    /// Subscribe to changes. Subscription is in place once this resolves,
    /// so a list issued afterwards never misses events.
    async fn watch_stream<S>(
        &self,
        namespace: &NameSpace,
    ) -> Result<BoxStream<'static, WatchResult<S>>, ClientError>
    where
        S: ResourceSpec;
}
