//! Sift CLI - AI-powered transaction categorizer
//!
//! Usage:
//!   sift categorize --file tx.csv   Categorize transactions from a file
//!   sift rules                      Show the demo-mode rule table
//!   sift serve --port 3000          Start the web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Categorize { file, json } => {
            let categorizer = sift_core::Categorizer::from_env();
            commands::cmd_categorize(&categorizer, &file, json).await
        }
        Commands::Rules => commands::cmd_rules(),
        Commands::Serve {
            port,
            host,
            cors_origin,
        } => commands::cmd_serve(&host, port, cors_origin).await,
    }
}
