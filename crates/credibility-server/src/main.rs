//! Credibility Server CLI
//!
//! Starts the HTTP server for casting and reading credibility votes.

use clap::Parser;
use credibility_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::path::PathBuf;
use std::process;

/// Credibility server - one positive or negative vote per user pair
#[derive(Debug, Parser)]
#[command(name = "credibility-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "CREDIBILITY_CONFIG",
        default_value = "./config/credibility.toml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let config = ServerConfig::from_file(&cli.config)?;
    init_tracing(&config)?;

    start_server(config).await
}
