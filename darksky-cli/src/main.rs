//! Binary crate for the `darksky` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod configure;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);
    cmd.run().await
}
