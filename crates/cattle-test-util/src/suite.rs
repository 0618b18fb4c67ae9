use std::sync::Arc;

use tracing::debug;

use cattle_controller::management::v3;
use cattle_controller::{ControllerFactoryConfig, Factory, MemoryClient};

/// In-memory control plane with every management validator installed
#[derive(Debug, Clone)]
pub struct IntegrationSuite {
    client: Arc<MemoryClient>,
    factory: Factory<MemoryClient>,
}

impl IntegrationSuite {
    pub fn setup() -> Self {
        Self::setup_with_config(ControllerFactoryConfig::default())
    }

    pub fn setup_with_config(config: ControllerFactoryConfig) -> Self {
        fluvio_future::subscriber::init_logger();

        let client = MemoryClient::with_management_admission();
        debug!(validators = client.admission().len(), "suite setup");
        let factory = Factory::new(client.clone(), config);
        Self { client, factory }
    }

    pub fn client(&self) -> &Arc<MemoryClient> {
        &self.client
    }

    pub fn factory(&self) -> &Factory<MemoryClient> {
        &self.factory
    }

    pub fn management(&self) -> v3::Version<MemoryClient> {
        self.factory.management().v3()
    }
}
