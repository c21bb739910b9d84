//! Binary crate for the `postal-weather` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and assembling configuration
//! - Tracing setup
//! - The HTTP surface (routing, JSON responses, error mapping)

use clap::Parser;

mod cli;
mod error;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
