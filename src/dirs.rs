use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// The two directories pawfeed keeps files in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// `client.toml`.
    Config,
    /// File storage (session, cats).
    Data,
}

impl DirKind {
    pub fn env_name(self) -> &'static str {
        match self {
            Self::Config => "PAWFEED_CONFIG",
            Self::Data => "PAWFEED_DATA",
        }
    }

    /// Picks the directory: the command line value first, then the
    /// environment variable, then the per-user (or system, as root) default.
    pub fn resolve(self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if let Some(path) = env::var_os(self.env_name()).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if is_root() {
            return Ok(self.default_dir(true, Path::new("/")));
        }
        let home = home_dir()?;
        Ok(self.default_dir(false, &home))
    }

    fn default_dir(self, root: bool, home: &Path) -> PathBuf {
        match (self, root) {
            (Self::Config, true) => PathBuf::from("/etc/pawfeed"),
            (Self::Data, true) => PathBuf::from("/var/lib/pawfeed"),
            (Self::Config, false) => home.join(".config").join("pawfeed"),
            (Self::Data, false) if cfg!(windows) => home.join("AppData").join("pawfeed"),
            (Self::Data, false) => home.join(".local").join("share").join("pawfeed"),
        }
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn home_dir() -> Result<PathBuf> {
    match env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => bail!(
            "could not determine home directory, use --config-path/--data-path or {}/{}",
            DirKind::Config.env_name(),
            DirKind::Data.env_name()
        ),
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(windows)]
fn is_root() -> bool {
    false
}
