use anyhow::{bail, Result};

use crate::api::schedule::{FeedSchedule, FeedTime, FoodAmount};
use crate::api::Ack;
use crate::client::{FeederClient, RequestError};

/// A single field of a schedule entry, carrying its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    FoodAmount(FoodAmount),
    FeedTime(FeedTime),
    Repeat(bool),
}

impl ScheduleField {
    /// Parses a field by its wire name (`foodAmount`, `feedTime`, `repeat`).
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        Ok(match name {
            "foodAmount" => Self::FoodAmount(value.parse()?),
            "feedTime" => Self::FeedTime(value.parse()?),
            "repeat" => match value {
                "true" | "yes" | "1" => Self::Repeat(true),
                "false" | "no" | "0" => Self::Repeat(false),
                _ => bail!("invalid repeat value '{value}', expect true or false"),
            },
            _ => bail!("unknown schedule field '{name}'"),
        })
    }
}

/// The feeding schedule being edited, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleEditor {
    entries: Vec<FeedSchedule>,
}

impl ScheduleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<FeedSchedule>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FeedSchedule] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry with default values. Its id is one more than the
    /// largest id present, so ids freed at the tail are handed out again.
    pub fn add(&mut self) -> Result<u32> {
        let max = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let id = match max.checked_add(1) {
            Some(id) => id,
            None => bail!("schedule id space exhausted"),
        };
        self.entries.push(FeedSchedule::with_defaults(id));
        Ok(id)
    }

    /// Removing the last remaining entry is allowed.
    pub fn delete(&mut self, id: u32) -> Result<FeedSchedule> {
        match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => Ok(self.entries.remove(idx)),
            None => bail!("schedule entry {id} not found"),
        }
    }

    pub fn update(&mut self, id: u32, field: ScheduleField) -> Result<()> {
        let entry = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry,
            None => bail!("schedule entry {id} not found"),
        };
        match field {
            ScheduleField::FoodAmount(amount) => entry.food_amount = amount,
            ScheduleField::FeedTime(time) => entry.feed_time = time,
            ScheduleField::Repeat(repeat) => entry.repeat = repeat,
        }
        Ok(())
    }

    /// Hands the whole list to the client in one call.
    pub async fn submit(&self, client: &FeederClient) -> Result<Ack, RequestError> {
        client.submit_schedule(&self.entries).await
    }
}
