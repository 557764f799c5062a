use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use pawfeed::config::ConfigArgs;

use super::{load_factory, RunCommand};

/// Show the signed in user and the selected cat.
#[derive(Args)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for WhoamiArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;

        let session = factory.build_session_store().load()?;
        if session.is_empty() {
            println!("Not logged in");
            return Ok(());
        }
        println!("User: {}", session.username);

        if let Some(cat) = factory.build_pet_store().selected()? {
            println!("Cat:  {} (id {})", cat.name, cat.id);
        }
        Ok(())
    }
}
