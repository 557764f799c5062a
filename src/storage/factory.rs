use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use super::config::{StorageConfig, StorageKind};
use super::{FileStorage, MemoryStorage, UnionStorage};

pub struct StorageFactory;

impl StorageFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_storage(&self, cfg: &StorageConfig) -> Arc<UnionStorage> {
        let storage = match cfg.kind {
            StorageKind::File => {
                debug!("Use file storage: {}", cfg.path);
                UnionStorage::File(FileStorage::new(PathBuf::from(&cfg.path)))
            }
            StorageKind::Memory => {
                debug!("Use memory storage, session will not be kept");
                UnionStorage::Memory(MemoryStorage::new())
            }
        };
        Arc::new(storage)
    }
}
