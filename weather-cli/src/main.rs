//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive menu loop
//! - Human-friendly table output

use clap::Parser;
use env_logger::Env;

mod cli;
mod prompt;
mod render;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug shows request and bucketing details on stderr.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
