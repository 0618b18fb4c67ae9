//!
//! # Controller factory configuration
//!
use std::collections::BTreeMap;
use std::fs::{File, read_to_string};
use std::io::Error as IoError;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::client::NameSpace;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_RESYNC: Duration = Duration::from_secs(10 * 60 * 60);
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IoError: {0}")]
    IoError(IoError),
    #[error("TomlError: {0}")]
    TomlError(toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerFactoryConfig {
    /// namespace to watch, all namespaces when absent
    pub namespace: Option<String>,
    /// workers per kind
    pub workers: usize,
    /// period after which every object is enqueued again
    #[serde(with = "humantime_serde")]
    pub resync: Duration,
    /// delay before a key whose handler failed is retried
    #[serde(with = "humantime_serde")]
    pub retry_backoff: Duration,
    /// worker count override by kind, ex: `Cluster = 10`
    pub kind_workers: BTreeMap<String, usize>,
}

impl Default for ControllerFactoryConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            workers: DEFAULT_WORKERS,
            resync: DEFAULT_RESYNC,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            kind_workers: BTreeMap::new(),
        }
    }
}

impl ControllerFactoryConfig {
    pub fn load_from<T: AsRef<Path>>(path: T) -> Result<Self, LoadConfigError> {
        let path_ref = path.as_ref();
        debug!(?path_ref, "loading from");

        let file_str = read_to_string(path_ref).map_err(LoadConfigError::IoError)?;
        Self::load_str(&file_str)
    }

    pub fn load_str(config: &str) -> Result<Self, LoadConfigError> {
        toml::from_str(config).map_err(LoadConfigError::TomlError)
    }

    pub fn save_to<T: AsRef<Path>>(&self, path: T) -> Result<(), IoError> {
        let path_ref = path.as_ref();
        debug!("saving config: {:#?} to: {:#?}", self, path_ref);
        let toml = toml::to_string(self).map_err(IoError::other)?;

        let mut file = File::create(path_ref)?;
        file.write_all(toml.as_bytes())?;
        file.sync_all()
    }

    pub fn watch_namespace(&self) -> NameSpace {
        match &self.namespace {
            Some(namespace) => NameSpace::from(namespace.as_str()),
            None => NameSpace::All,
        }
    }

    pub fn workers_for(&self, kind: &str) -> usize {
        self.kind_workers
            .get(kind)
            .copied()
            .unwrap_or(self.workers)
            .max(1)
    }
}
