use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::api::device::FoodStatus;
use crate::api::schedule::FeedSchedule;
use crate::pets::Cat;
use crate::table::Table;
use crate::time::format_since;

/// Display style options for output formatting
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayStyle {
    /// Display data in a formatted table
    Table,
    /// Display data in JSON format
    Json,
}

/// Types that can be shown as rows of a terminal table
pub trait TerminalDisplay {
    fn table_titles() -> Vec<&'static str>;
    fn table_row(&self) -> Vec<String>;
}

pub fn pretty_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}

pub fn display_list<T>(items: &[T], style: DisplayStyle) -> Result<()>
where
    T: Serialize + TerminalDisplay,
{
    match style {
        DisplayStyle::Table => {
            if items.is_empty() {
                println!("<empty list>");
                return Ok(());
            }
            let mut table = Table::with_capacity(items.len() + 1);
            table.add(T::table_titles().into_iter().map(String::from).collect());
            for item in items {
                table.add(item.table_row());
            }
            table.show();
            Ok(())
        }
        DisplayStyle::Json => pretty_json(items),
    }
}

impl TerminalDisplay for FeedSchedule {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Time", "Amount", "Repeat"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.feed_time.to_string(),
            self.food_amount.to_string(),
            String::from(if self.repeat { "daily" } else { "once" }),
        ]
    }
}

impl TerminalDisplay for FoodStatus {
    fn table_titles() -> Vec<&'static str> {
        vec!["Level", "LastFeed", "FeedsRemaining"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.level.to_string(),
            format_since(self.last_feed),
            self.feeds_remaining.to_string(),
        ]
    }
}

impl TerminalDisplay for Cat {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Name", "Age", "Weight"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.age.map(|a| a.to_string()).unwrap_or_default(),
            self.weight.clone().unwrap_or_default(),
        ]
    }
}
