mod file;
mod memory;

pub mod config;
pub mod factory;

use anyhow::Result;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key-value persistence used by the session store and pet profiles. Values
/// are opaque strings, usually JSON documents.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: String) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub enum UnionStorage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl Storage for UnionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::File(storage) => storage.get(key),
            Self::Memory(storage) => storage.get(key),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        match self {
            Self::File(storage) => storage.set(key, value),
            Self::Memory(storage) => storage.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Self::File(storage) => storage.remove(key),
            Self::Memory(storage) => storage.remove(key),
        }
    }

    fn clear(&self) -> Result<()> {
        match self {
            Self::File(storage) => storage.clear(),
            Self::Memory(storage) => storage.clear(),
        }
    }
}

#[cfg(test)]
pub(crate) fn run_storage_tests(storage: &dyn Storage) {
    storage.clear().unwrap();
    assert_eq!(storage.get("user").unwrap(), None);

    storage.set("user", String::from("{\"username\":\"alice\"}")).unwrap();
    storage.set("cats", String::from("[]")).unwrap();
    assert_eq!(
        storage.get("user").unwrap().as_deref(),
        Some("{\"username\":\"alice\"}")
    );

    storage.set("user", String::from("{}")).unwrap();
    assert_eq!(storage.get("user").unwrap().as_deref(), Some("{}"));

    storage.remove("user").unwrap();
    assert_eq!(storage.get("user").unwrap(), None);
    assert_eq!(storage.get("cats").unwrap().as_deref(), Some("[]"));

    // Removing a missing key is not an error
    storage.remove("user").unwrap();

    storage.clear().unwrap();
    assert_eq!(storage.get("cats").unwrap(), None);
}
