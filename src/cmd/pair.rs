use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use pawfeed::config::ConfigArgs;

use super::{load_factory, RunCommand};

/// Connect and provision a feeder by its device id.
#[derive(Args)]
pub struct PairArgs {
    pub device_id: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for PairArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let client = factory.build_client()?;

        let ack = client.provision_device(&self.device_id).await?;
        if !ack.success {
            bail!("failed to connect to device '{}'", self.device_id);
        }
        println!("Device connected and provisioned");
        Ok(())
    }
}
