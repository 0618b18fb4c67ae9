//!
//! # Generated controller registry
//!
//! Entry point is [`Factory`]: `Factory::new(client, config).management().v3()`.
//!
pub mod management;

use std::sync::Arc;

use crate::client::{MetadataClient, SharedClient};
use crate::config::ControllerFactoryConfig;
use crate::factory::SharedControllerFactory;

/// Owns the shared controller factory behind every generated group
#[derive(Debug)]
pub struct Factory<C> {
    controller_factory: Arc<SharedControllerFactory<C>>,
}

impl<C> Clone for Factory<C> {
    fn clone(&self) -> Self {
        Self {
            controller_factory: self.controller_factory.clone(),
        }
    }
}

impl<C> Factory<C>
where
    C: MetadataClient,
{
    pub fn new(client: SharedClient<C>, config: ControllerFactoryConfig) -> Self {
        Self::from_controller_factory(SharedControllerFactory::shared(client, config))
    }

    pub fn from_controller_factory(controller_factory: Arc<SharedControllerFactory<C>>) -> Self {
        Self { controller_factory }
    }

    pub fn controller_factory(&self) -> &Arc<SharedControllerFactory<C>> {
        &self.controller_factory
    }

    pub fn management(&self) -> management::Group<C> {
        management::new(self.controller_factory.clone())
    }

    /// start every controller that has handlers
    pub fn start(&self) {
        self.controller_factory.start();
    }
}
