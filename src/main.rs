mod cmd;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use cmd::App;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            _ = writeln!(io::stderr(), "Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
