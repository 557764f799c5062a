use std::fmt::{self, Display};

use anyhow::{bail, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PROVISION_PATH: &str = "/device/provision";
pub const STATUS_PATH: &str = "/device/status";
pub const FEED_PATH: &str = "/device/feed";

/// Snapshot of the feeder's hopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FoodStatus {
    pub level: FoodLevel,

    pub last_feed: DateTime<Utc>,

    pub feeds_remaining: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionRequest {
    pub device_id: String,
}

/// Hopper fill level in percent, 0 to 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct FoodLevel(u8);

impl FoodLevel {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Result<Self> {
        if percent > Self::MAX {
            bail!("food level must be in range [0, {}], got {percent}", Self::MAX);
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FoodLevel {
    type Error = Error;

    fn try_from(percent: u8) -> Result<Self> {
        Self::new(percent)
    }
}

impl From<FoodLevel> for u8 {
    fn from(level: FoodLevel) -> u8 {
        level.0
    }
}

impl Display for FoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
