use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "StorageKind::default")]
    pub kind: StorageKind,

    /// Path of the storage file, only used by the `file` kind. Empty means
    /// `<data_path>/storage.json`.
    #[serde(default = "StorageConfig::default_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub enum StorageKind {
    #[serde(rename = "file")]
    #[default]
    File,

    #[serde(rename = "memory")]
    Memory,
}

impl CommonConfig for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            path: Self::default_path(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        if !matches!(self.kind, StorageKind::File) {
            return Ok(());
        }

        self.path = expandenv("path", &self.path)?;
        if self.path.is_empty() {
            let path = ps.data_path.join("storage.json");
            self.path = format!("{}", path.display());
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn default_path() -> String {
        String::new()
    }
}
