//! Server command implementation

use anyhow::Result;
use sift_core::{Categorizer, Mode};

pub async fn cmd_serve(host: &str, port: u16, cors_origins: Vec<String>) -> Result<()> {
    println!("🚀 Starting Sift web server...");
    println!("   Listening: http://{}:{}", host, port);

    let categorizer = Categorizer::from_env();
    match categorizer.mode() {
        Mode::Ai => println!("   Mode: ai (Claude categorization)"),
        Mode::Demo => println!("   Mode: demo (keyword rules; set ANTHROPIC_API_KEY for AI)"),
    }

    if !cors_origins.is_empty() {
        println!("   CORS origins: {}", cors_origins.join(", "));
    }

    println!();
    println!("   Press Ctrl+C to stop");

    let config = sift_server::ServerConfig {
        allowed_origins: cors_origins,
    };
    tracing::debug!("Binding {}:{}", host, port);

    sift_server::serve(categorizer, host, port, config).await?;

    Ok(())
}
