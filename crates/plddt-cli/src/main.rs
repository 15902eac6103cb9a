//! Entrypoint for CLI

use clap::Parser;
mod cli;
mod commands;
mod logging;

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = cli::Cli::parse();
    cli.execute()?;
    Ok(())
}
