use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};
use crate::logs::LogsConfig;
use crate::storage::config::StorageConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_server")]
    pub server: String,

    /// How often the food status is refreshed while it is watched.
    #[serde(default = "ClientConfig::default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "StorageConfig::default")]
    pub storage: StorageConfig,

    #[serde(default = "DeviceConfig::default")]
    pub device: DeviceConfig,

    #[serde(default = "LogsConfig::default")]
    pub logs: LogsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DeviceConfig {
    #[serde(default = "DeviceBackend::default")]
    pub backend: DeviceBackend,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub enum DeviceBackend {
    /// Canned responses, no device or backend endpoint is involved.
    #[serde(rename = "mock")]
    #[default]
    Mock,

    #[serde(rename = "remote")]
    Remote,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            server: Self::default_server(),
            poll_interval_secs: Self::default_poll_interval_secs(),
            storage: StorageConfig::default(),
            device: DeviceConfig::default(),
            logs: LogsConfig::default(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        self.server = expandenv("server", &self.server)?;
        if self.server.is_empty() {
            bail!("server cannot be empty");
        }
        let url = match Url::parse(&self.server) {
            Ok(url) => url,
            Err(_) => bail!("invalid server url '{}'", self.server),
        };
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "invalid server url scheme, expect 'http' or 'https', not '{}'",
                url.scheme()
            );
        }

        if self.poll_interval_secs < Self::MIN_POLL_INTERVAL_SECS {
            bail!(
                "poll_interval_secs must be greater than or equal to {}",
                Self::MIN_POLL_INTERVAL_SECS
            );
        }
        if self.poll_interval_secs > Self::MAX_POLL_INTERVAL_SECS {
            bail!(
                "poll_interval_secs must be less than or equal to {}",
                Self::MAX_POLL_INTERVAL_SECS
            );
        }

        self.storage.complete(ps).context("storage")?;
        Ok(())
    }
}

impl ClientConfig {
    const MIN_POLL_INTERVAL_SECS: u64 = 1;
    const MAX_POLL_INTERVAL_SECS: u64 = 60 * 60;

    pub fn default_server() -> String {
        String::from("http://127.0.0.1:8000")
    }

    pub fn default_poll_interval_secs() -> u64 {
        60
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::storage::config::StorageKind;

    use super::*;

    fn build_path_set(name: &str) -> (PathSet, PathBuf) {
        let base = PathBuf::from(name);
        let _ = fs::remove_dir_all(&base);
        let ps = PathSet::new(Some(base.join("config")), Some(base.join("data"))).unwrap();
        (ps, base)
    }

    #[test]
    fn test_default_config() {
        let (ps, base) = build_path_set("_test_client_config_default");

        let cfg: ClientConfig = ps.load_config("client", ClientConfig::default).unwrap();
        assert_eq!(cfg.server, "http://127.0.0.1:8000");
        assert_eq!(cfg.poll_interval(), Duration::from_secs(60));
        assert_eq!(cfg.device.backend, DeviceBackend::Mock);
        assert_eq!(cfg.storage.kind, StorageKind::File);
        assert_eq!(
            PathBuf::from(&cfg.storage.path),
            ps.data_path.join("storage.json")
        );

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_config_file() {
        let (ps, base) = build_path_set("_test_client_config_file");

        fs::write(
            ps.config_path.join("client.toml"),
            r#"
server = "https://feeder.example.com"
poll_interval_secs = 5

[storage]
kind = "memory"

[device]
backend = "remote"

[logs]
level = "debug"
"#,
        )
        .unwrap();
        let cfg: ClientConfig = ps.load_config("client", ClientConfig::default).unwrap();
        assert_eq!(cfg.server, "https://feeder.example.com");
        assert_eq!(cfg.poll_interval_secs, 5);
        assert_eq!(cfg.storage.kind, StorageKind::Memory);
        assert_eq!(cfg.device.backend, DeviceBackend::Remote);

        for invalid in [
            "server = \"\"",
            "server = \"ftp://feeder\"",
            "poll_interval_secs = 0",
            "poll_interval_secs = 7200",
        ] {
            fs::write(ps.config_path.join("client.toml"), invalid).unwrap();
            let result = ps.load_config("client", ClientConfig::default);
            assert!(result.is_err(), "{invalid}");
        }

        fs::remove_dir_all(&base).unwrap();
    }
}
