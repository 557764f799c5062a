use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::{bail, Context, Error, Result};
use serde::{Deserialize, Serialize};

pub const SCHEDULE_PATH: &str = "/schedule";

/// One automatic feeding event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedSchedule {
    pub id: u32,
    pub food_amount: FoodAmount,
    pub feed_time: FeedTime,
    pub repeat: bool,
}

impl FeedSchedule {
    /// Builds an entry with the values a fresh schedule form starts with.
    pub fn with_defaults(id: u32) -> Self {
        Self {
            id,
            food_amount: FoodAmount::default(),
            feed_time: FeedTime::default(),
            repeat: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitScheduleRequest<'a> {
    pub slots: &'a [FeedSchedule],
}

/// Portion size in grams: a multiple of 5 between 5 and 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct FoodAmount(u32);

impl FoodAmount {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 100;
    pub const STEP: u32 = 5;

    pub fn new(grams: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&grams) {
            bail!(
                "food amount must be between {}g and {}g, got {grams}g",
                Self::MIN,
                Self::MAX
            );
        }
        if grams % Self::STEP != 0 {
            bail!(
                "food amount must be a multiple of {}g, got {grams}g",
                Self::STEP
            );
        }
        Ok(Self(grams))
    }

    pub fn grams(self) -> u32 {
        self.0
    }
}

impl Default for FoodAmount {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u32> for FoodAmount {
    type Error = Error;

    fn try_from(grams: u32) -> Result<Self> {
        Self::new(grams)
    }
}

impl From<FoodAmount> for u32 {
    fn from(amount: FoodAmount) -> u32 {
        amount.0
    }
}

impl FromStr for FoodAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().trim_end_matches('g');
        let grams: u32 = s
            .parse()
            .with_context(|| format!("invalid food amount '{s}'"))?;
        Self::new(grams)
    }
}

impl Display for FoodAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.0)
    }
}

/// Local wall-clock time of a feeding, written as `HH:MM`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct FeedTime {
    hour: u8,
    minute: u8,
}

impl FeedTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            bail!("hour must be in range [0, 23], got {hour}");
        }
        if minute > 59 {
            bail!("minute must be in range [0, 59], got {minute}");
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl Default for FeedTime {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl FromStr for FeedTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) = match s.split_once(':') {
            Some(parts) => parts,
            None => bail!("invalid feed time '{s}', expect 'HH:MM'"),
        };
        let is_two_digits =
            |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(hour) || !is_two_digits(minute) {
            bail!("invalid feed time '{s}', expect 'HH:MM'");
        }
        let hour: u8 = hour
            .parse()
            .with_context(|| format!("invalid hour in feed time '{s}'"))?;
        let minute: u8 = minute
            .parse()
            .with_context(|| format!("invalid minute in feed time '{s}'"))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for FeedTime {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<FeedTime> for String {
    fn from(time: FeedTime) -> String {
        time.to_string()
    }
}

impl Display for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
