use std::path::PathBuf;
use std::{fs, io};

use anyhow::{Context, Result};
use clap::Args;
use log::warn;
use serde::de::DeserializeOwned;

use crate::dirs::{self, DirKind};

/// Global command line arguments for locating config and data directories.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// The config directory, default is `~/.config/pawfeed`.
    #[arg(long)]
    pub config_path: Option<String>,

    /// The data directory (session storage, logs), default is `~/.local/share/pawfeed`.
    #[arg(long)]
    pub data_path: Option<String>,

    /// Print debug logs.
    #[arg(long)]
    pub debug: bool,
}

impl ConfigArgs {
    pub fn build_path_set(&self) -> Result<PathSet> {
        PathSet::new(
            self.config_path.as_ref().map(PathBuf::from),
            self.data_path.as_ref().map(PathBuf::from),
        )
    }
}

pub struct PathSet {
    pub config_path: PathBuf,
    pub data_path: PathBuf,
}

impl PathSet {
    pub fn new(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let config_path = DirKind::Config.resolve(config_path)?;
        let data_path = DirKind::Data.resolve(data_path)?;

        dirs::ensure_dir_exists(&config_path)
            .with_context(|| format!("ensure config directory: {}", config_path.display()))?;
        dirs::ensure_dir_exists(&data_path)
            .with_context(|| format!("ensure data directory: {}", data_path.display()))?;

        Ok(Self {
            config_path,
            data_path,
        })
    }

    pub fn load_config<T, F>(&self, name: &str, default_func: F) -> Result<T>
    where
        T: CommonConfig + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.config_path.join(format!("{name}.toml"));
        let mut cfg: T = match fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s).context("parse config toml")?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Config file for {name} not found, using defaults");
                default_func()
            }
            Err(err) => {
                return Err(err).context(format!("read config file: {}", path.display()));
            }
        };

        cfg.complete(self).context("validate config")?;
        Ok(cfg)
    }
}

pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self, ps: &PathSet) -> Result<()>;
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[derive(serde::Deserialize)]
    struct TestConfig {
        #[serde(default)]
        name: String,
    }

    impl CommonConfig for TestConfig {
        fn default() -> Self {
            Self {
                name: String::from("default"),
            }
        }

        fn complete(&mut self, _ps: &PathSet) -> Result<()> {
            self.name = expandenv("name", &self.name)?;
            Ok(())
        }
    }

    #[test]
    fn test_load_config() {
        let base = PathBuf::from("_test_load_config");
        let _ = fs::remove_dir_all(&base);

        let ps = PathSet::new(Some(base.join("config")), Some(base.join("data"))).unwrap();
        assert!(ps.data_path.is_dir());

        let cfg: TestConfig = ps.load_config("test", TestConfig::default).unwrap();
        assert_eq!(cfg.name, "default");

        env::set_var("PAWFEED_TEST_NAME", "whiskers");
        fs::write(
            ps.config_path.join("test.toml"),
            "name = \"${PAWFEED_TEST_NAME}\"\n",
        )
        .unwrap();
        let cfg: TestConfig = ps.load_config("test", TestConfig::default).unwrap();
        assert_eq!(cfg.name, "whiskers");

        fs::remove_dir_all(&base).unwrap();
    }
}
