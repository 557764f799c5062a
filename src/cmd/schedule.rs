use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::Args;
use pawfeed::api::schedule::{FeedTime, FoodAmount};
use pawfeed::config::ConfigArgs;
use pawfeed::display::{display_list, DisplayStyle};
use pawfeed::schedule::{ScheduleEditor, ScheduleField};

use super::{load_factory, RunCommand};

/// Set the feeding schedule. Each `--slot` adds one feeding; without any slot
/// a single default feeding (08:00, 50g) is submitted.
#[derive(Args)]
pub struct ScheduleArgs {
    /// A feeding as `HH:MM/GRAMS`, append `/repeat` to repeat it daily. Grams
    /// must be a multiple of 5 between 5 and 100.
    #[arg(short, long = "slot", value_parser = parse_slot)]
    pub slots: Vec<Slot>,

    /// Only print the schedule, do not submit it.
    #[arg(long)]
    pub dry_run: bool,

    /// The display style.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Clone, Copy)]
pub struct Slot {
    time: FeedTime,
    amount: FoodAmount,
    repeat: bool,
}

fn parse_slot(s: &str) -> Result<Slot> {
    let mut parts = s.split('/');
    let time = match parts.next() {
        Some(time) => time.parse()?,
        None => bail!("missing feed time"),
    };
    let amount = match parts.next() {
        Some(amount) => amount.parse()?,
        None => FoodAmount::default(),
    };
    let repeat = match parts.next() {
        Some("repeat") | Some("daily") => true,
        Some("once") | None => false,
        Some(flag) => bail!("unknown slot flag '{flag}', expect 'repeat' or 'once'"),
    };
    if parts.next().is_some() {
        bail!("too many parts in slot '{s}', expect 'HH:MM/GRAMS[/repeat]'");
    }
    Ok(Slot {
        time,
        amount,
        repeat,
    })
}

#[async_trait]
impl RunCommand for ScheduleArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let editor = self.build_editor()?;

        display_list(editor.entries(), self.output)?;
        if self.dry_run {
            return Ok(());
        }

        let client = factory.build_client()?;
        let ack = editor.submit(&client).await?;
        if !ack.success {
            bail!("schedule was not accepted");
        }
        println!("Schedule saved");
        Ok(())
    }
}

impl ScheduleArgs {
    fn build_editor(&self) -> Result<ScheduleEditor> {
        let mut editor = ScheduleEditor::new();
        if self.slots.is_empty() {
            editor.add()?;
            return Ok(editor);
        }

        for slot in self.slots.iter() {
            let id = editor.add()?;
            for field in [
                ScheduleField::FeedTime(slot.time),
                ScheduleField::FoodAmount(slot.amount),
                ScheduleField::Repeat(slot.repeat),
            ] {
                editor
                    .update(id, field)
                    .with_context(|| format!("update schedule entry {id}"))?;
            }
        }
        Ok(editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot() {
        let slot = parse_slot("07:30/25/repeat").unwrap();
        assert_eq!(slot.time.to_string(), "07:30");
        assert_eq!(slot.amount.grams(), 25);
        assert!(slot.repeat);

        let slot = parse_slot("18:00").unwrap();
        assert_eq!(slot.amount, FoodAmount::default());
        assert!(!slot.repeat);

        for invalid in ["", "7:30/25", "07:30/26", "07:30/25/sometimes", "07:30/25/once/x"] {
            assert!(parse_slot(invalid).is_err(), "{invalid}");
        }
    }
}
