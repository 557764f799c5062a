use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, UnionStorage};

/// Storage key of the session record.
pub const USER_KEY: &str = "user";

/// Storage key of the bare token written by older clients. Only ever read.
pub const LEGACY_TOKEN_KEY: &str = "token";

/// The authenticated user. An empty session (see [`Session::is_empty`]) stands
/// for "not logged in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.token.is_empty()
    }
}

/// The stored shape of a session. Version 0 is the untagged record written by
/// older clients, which only carried a `name` field.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    version: u32,

    #[serde(default, alias = "name")]
    username: String,

    #[serde(default)]
    token: String,
}

impl SessionRecord {
    const CURRENT_VERSION: u32 = 1;
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<UnionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<UnionStorage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let record = SessionRecord {
            version: SessionRecord::CURRENT_VERSION,
            username: session.username.clone(),
            token: session.token.clone(),
        };
        let data = serde_json::to_string(&record).context("encode session record")?;
        self.storage.set(USER_KEY, data).context("save session")?;

        // The nested token is authoritative from now on, a stale flat token
        // must not come back after this one is cleared.
        self.storage
            .remove(LEGACY_TOKEN_KEY)
            .context("remove legacy token")?;

        info!("Session saved for user '{}'", session.username);
        Ok(())
    }

    /// Returns the stored session, or an empty one when nothing usable is
    /// stored.
    pub fn load(&self) -> Result<Session> {
        Ok(match self.load_record()? {
            Some(record) => Session {
                username: record.username,
                token: record.token,
            },
            None => Session::default(),
        })
    }

    /// Removes every key from the storage, not only the session record.
    pub fn clear(&self) -> Result<()> {
        self.storage.clear().context("clear storage")?;
        info!("Session cleared");
        Ok(())
    }

    /// Resolves the bearer token: the token inside the session record first,
    /// then the legacy flat key.
    pub fn token(&self) -> Result<Option<String>> {
        if let Some(record) = self.load_record()? {
            if !record.token.is_empty() {
                return Ok(Some(record.token));
            }
        }

        let legacy = match self.storage.get(LEGACY_TOKEN_KEY)? {
            Some(legacy) => legacy,
            None => return Ok(None),
        };
        // Older clients wrote the token raw, some wrapped it as a JSON string.
        let legacy = match serde_json::from_str::<String>(&legacy) {
            Ok(token) => token,
            Err(_) => legacy.trim().to_string(),
        };
        if legacy.is_empty() {
            return Ok(None);
        }

        warn!("Using legacy token from key '{LEGACY_TOKEN_KEY}', please login again");
        Ok(Some(legacy))
    }

    fn load_record(&self) -> Result<Option<SessionRecord>> {
        let data = match self.storage.get(USER_KEY).context("load session")? {
            Some(data) => data,
            None => return Ok(None),
        };

        let record: SessionRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(_) => {
                warn!("Session record is invalid, we will ignore it");
                return Ok(None);
            }
        };
        if record.version > SessionRecord::CURRENT_VERSION {
            warn!(
                "Session record version {} is not supported, we will ignore it",
                record.version
            );
            return Ok(None);
        }

        Ok(Some(record))
    }
}
