//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sift - AI-powered transaction categorization
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Categorize financial transactions with Claude or keyword rules", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize transactions from a file
    Categorize {
        /// Transaction file: .csv with date,description,amount[,type] columns,
        /// or .json with an array of transaction objects
        #[arg(short, long)]
        file: PathBuf,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the demo-mode keyword rule table
    Rules,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable; default is same-origin only)
        #[arg(long)]
        cors_origin: Vec<String>,
    },
}
