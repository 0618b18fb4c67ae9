//!
//! # Controllers for the management API group
//!
//! Typed controllers are handed out by the generated registry in
//! [`generated::management`]. Every controller of a kind shares one
//! [`SharedController`] owned by the [`SharedControllerFactory`].
//!
mod error;
pub mod config;
pub mod client;
pub mod factory;
pub mod controller;
pub mod generated;

pub use error::ClientError;
pub use config::{ControllerFactoryConfig, LoadConfigError};
pub use client::{MetadataClient, NameSpace, ObjectKey, SharedClient};
pub use client::memory::MemoryClient;
pub use factory::{SharedController, SharedControllerFactory, WorkQueue};
pub use controller::Controller;
pub use generated::Factory;
pub use generated::management;

pub use cattle_management_metadata as metadata;
pub use cattle_webhook as webhook;
pub use k8_types;
