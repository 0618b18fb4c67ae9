// Code generated by codegen. DO NOT EDIT.

pub mod v3;

use std::sync::Arc;

use crate::client::MetadataClient;
use crate::factory::SharedControllerFactory;

pub trait Interface<C> {
    fn v3(&self) -> v3::Version<C>;
}

#[derive(Debug)]
pub struct Group<C> {
    controller_factory: Arc<SharedControllerFactory<C>>,
}

/// management.cattle.io group over a shared factory
pub fn new<C: MetadataClient>(controller_factory: Arc<SharedControllerFactory<C>>) -> Group<C> {
    Group { controller_factory }
}

impl<C: MetadataClient> Group<C> {
    pub fn v3(&self) -> v3::Version<C> {
        <Self as Interface<C>>::v3(self)
    }
}

impl<C: MetadataClient> Interface<C> for Group<C> {
    fn v3(&self) -> v3::Version<C> {
        v3::new(self.controller_factory.clone())
    }
}
