mod config;
mod feed;
mod login;
mod logout;
mod pair;
mod pets;
mod register;
mod schedule;
mod status;
mod whoami;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use pawfeed::client::factory::ClientFactory;
use pawfeed::config::ConfigArgs;
use pawfeed::logs;

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Config(config::ShowConfigArgs),
    Feed(feed::FeedArgs),
    Login(login::LoginArgs),
    Logout(logout::LogoutArgs),
    Pair(pair::PairArgs),
    Pets(pets::PetsCommand),
    Register(register::RegisterArgs),
    Schedule(schedule::ScheduleArgs),
    Status(status::StatusArgs),
    Whoami(whoami::WhoamiArgs),
}

impl App {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Config(args) => args.run().await,
            Commands::Feed(args) => args.run().await,
            Commands::Login(args) => args.run().await,
            Commands::Logout(args) => args.run().await,
            Commands::Pair(args) => args.run().await,
            Commands::Pets(args) => args.run().await,
            Commands::Register(args) => args.run().await,
            Commands::Schedule(args) => args.run().await,
            Commands::Status(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
        }
    }
}

/// Installs the logger and loads the client config, the common first step of
/// every command.
pub fn load_factory(args: &ConfigArgs) -> Result<ClientFactory> {
    logs::init(args.debug)?;
    let ps = args.build_path_set()?;
    let factory = ClientFactory::load(&ps)?;
    factory.config().logs.apply(args.debug);
    Ok(factory)
}
