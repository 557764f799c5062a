use std::sync::Arc;

use anyhow::Result;

use crate::config::{CommonConfig, PathSet};
use crate::pets::PetStore;
use crate::session::SessionStore;
use crate::storage::factory::StorageFactory;
use crate::storage::UnionStorage;

use super::config::{ClientConfig, DeviceBackend};
use super::device::{MockDevice, RemoteDevice, UnionDevice};
use super::fetch::{AuthFetch, Transport};
use super::FeederClient;

/// Builds the client side objects from one config, sharing a single storage
/// between them.
pub struct ClientFactory {
    cfg: ClientConfig,
    storage: Arc<UnionStorage>,
}

impl ClientFactory {
    pub fn new(cfg: ClientConfig) -> Self {
        let storage = StorageFactory::new().build_storage(&cfg.storage);
        Self { cfg, storage }
    }

    pub fn load(ps: &PathSet) -> Result<Self> {
        let cfg = ps.load_config("client", ClientConfig::default)?;
        Ok(Self::new(cfg))
    }

    pub fn build_client(&self) -> Result<FeederClient> {
        let transport = Transport::new(&self.cfg.server)?;
        let fetch = AuthFetch::new(transport, self.build_session_store());

        let device = match self.cfg.device.backend {
            DeviceBackend::Mock => UnionDevice::Mock(MockDevice),
            DeviceBackend::Remote => UnionDevice::Remote(RemoteDevice::new(fetch.clone())),
        };

        Ok(FeederClient::new(fetch, device))
    }

    pub fn build_session_store(&self) -> SessionStore {
        SessionStore::new(self.storage.clone())
    }

    pub fn build_pet_store(&self) -> PetStore {
        PetStore::new(self.storage.clone())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }
}
