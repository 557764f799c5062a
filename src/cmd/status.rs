use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use log::info;
use pawfeed::config::ConfigArgs;
use pawfeed::display::{display_list, DisplayStyle};
use pawfeed::poller::{PollState, StatusPoller};
use tokio::{select, signal};

use super::{load_factory, RunCommand};

/// Show the food level of the feeder.
#[derive(Args)]
pub struct StatusArgs {
    /// Keep refreshing the status until interrupted.
    #[arg(short, long)]
    pub watch: bool,

    /// The display style.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for StatusArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let client = factory.build_client()?;

        if !self.watch {
            let status = client.get_food_status().await?;
            return display_list(&[status], self.output);
        }

        let poller = StatusPoller::start(Arc::new(client), factory.config().poll_interval());
        let mut state_rx = poller.subscribe();
        loop {
            select! {
                _ = signal::ctrl_c() => {
                    info!("Interrupted, stop watching");
                    break;
                }
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = state_rx.borrow_and_update().clone();
                    match state {
                        PollState::Pending => {}
                        PollState::Ready(status) => display_list(&[status], self.output)?,
                        PollState::Failed(e) => eprintln!("Refresh failed: {e}"),
                    }
                }
            }
        }

        poller.stop().await;
        Ok(())
    }
}
