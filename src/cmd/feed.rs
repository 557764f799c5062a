use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use pawfeed::config::ConfigArgs;
use pawfeed::time::format_local_time;

use super::{load_factory, RunCommand};

/// Dispense one portion right now.
#[derive(Args)]
pub struct FeedArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for FeedArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let client = factory.build_client()?;

        let ack = client.feed_now().await?;
        if !ack.success {
            bail!("feeder refused to feed");
        }
        match ack.time {
            Some(time) => println!("Fed successfully at {}", format_local_time(time)),
            None => println!("Fed successfully"),
        }
        Ok(())
    }
}
