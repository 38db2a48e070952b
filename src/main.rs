use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod chain;
mod cli;
mod config;
mod engine;
mod monitoring;
mod rpc;
mod wallet;

use cli::args::Cli;
use cli::context::{init_tracing, load_configuration};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_configuration(cli.config.clone())?;
    init_tracing(&config.logging)?;

    let ok = cli::run(cli, config).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
