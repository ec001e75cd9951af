//! Multi-room TCP Chat Server - Entry Point
//!
//! Loads configuration, binds the listener, and runs the accept loop.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chatroomd::{ChatServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chatroomd=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatroomd=info")),
        )
        .init();

    // Optional first argument: path to a TOML config file
    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };

    let server = ChatServer::bind(&config).await?;
    server.run().await;

    Ok(())
}
