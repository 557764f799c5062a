use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use console::Term;
use pawfeed::config::ConfigArgs;

use super::{load_factory, RunCommand};

/// Sign in and keep the session for later commands.
#[derive(Args)]
pub struct LoginArgs {
    pub username: String,

    /// The password, prompted for when omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let client = factory.build_client()?;

        let password = match self.password {
            Some(ref password) => password.clone(),
            None => read_password("Password: ")?,
        };
        if self.username.is_empty() || password.is_empty() {
            bail!("username and password are required");
        }

        client.login(&self.username, &password).await?;
        println!("Logged in as {}", self.username);
        Ok(())
    }
}

pub fn read_password(prompt: &str) -> Result<String> {
    let term = Term::stderr();
    term.write_str(prompt)?;
    let password = term.read_secure_line()?;
    Ok(password)
}
