//! `board`: call the discussion board API from the shell.
//!
//! Results are printed as pretty JSON on stdout; failures go to stderr with a
//! non-zero exit status. Set `RUST_LOG=board_client=debug` to trace requests.

use std::io::{self, Write};
use std::process::ExitCode;

use board_client::BoardClient;
use board_client::cli::{Cli, execute};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        drop(err);
    }

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(output) => {
            if let Err(err) = writeln!(io::stdout().lock(), "{output}") {
                drop(err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let client = BoardClient::new(&cli.base_url)?;
    let output = execute(&client, &cli.command).await?;
    Ok(serde_json::to_string_pretty(&output)?)
}
