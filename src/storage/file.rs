use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;

use crate::filelock::{read_file_lock, write_file_lock};

use super::Storage;

/// Stores all keys in one JSON object file. Every operation reads the file
/// again, so changes made by another invocation are always visible.
pub struct FileStorage {
    path: PathBuf,
}

type Items = BTreeMap<String, String>;

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> Result<Items> {
        let data = match read_file_lock(&self.path)
            .with_context(|| format!("read storage file {}", self.path.display()))?
        {
            Some(data) => data,
            None => return Ok(Items::new()),
        };
        if data.is_empty() {
            return Ok(Items::new());
        }

        serde_json::from_slice(&data)
            .with_context(|| format!("parse storage file {}", self.path.display()))
    }

    fn write(&self, items: &Items) -> Result<()> {
        let data = serde_json::to_vec_pretty(items)?;
        write_file_lock(&self.path, &data)
            .with_context(|| format!("write storage file {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.read()?;
        Ok(items.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut items = self.read()?;
        debug!("Storage set '{key}', {} bytes", value.len());
        items.insert(key.to_string(), value);
        self.write(&items)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut items = self.read()?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        debug!("Storage remove '{key}'");
        self.write(&items)
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove storage file {}", self.path.display()))
            }
        }
    }
}
