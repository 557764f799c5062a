use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use pawfeed::config::ConfigArgs;
use pawfeed::display::pretty_json;

use super::{load_factory, RunCommand};

/// Display the configuration in use as JSON.
#[derive(Args)]
pub struct ShowConfigArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for ShowConfigArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        pretty_json(factory.config())
    }
}
