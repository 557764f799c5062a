use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use pawfeed::api::user::RegisterForm;
use pawfeed::config::ConfigArgs;

use super::login::read_password;
use super::{load_factory, RunCommand};

/// Create a new account on the server.
#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,

    pub email: String,

    /// The password, prompted for (twice) when omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for RegisterArgs {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let client = factory.build_client()?;

        let (password, confirm_password) = match self.password {
            Some(ref password) => (password.clone(), password.clone()),
            None => (
                read_password("Password: ")?,
                read_password("Confirm password: ")?,
            ),
        };
        let form = RegisterForm {
            username: self.username.clone(),
            email: self.email.clone(),
            password,
            confirm_password,
        };

        client.register(form).await?;
        println!("Registration successful, you can login now");
        Ok(())
    }
}
