use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use pawfeed::config::ConfigArgs;

use super::{load_factory, RunCommand};

/// Sign out, removing the session and every other stored value.
#[derive(Args)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LogoutArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        factory.build_session_store().clear()?;
        println!("Signed out");
        Ok(())
    }
}
