//! Hotel Operations HTTP Server Binary
//!
//! Entry point for the reporting API server. It selects a repository
//! backend, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) repository (default)
//! cargo run --bin hotelops-server --features "local-repo,http-server"
//!
//! # Run against the collaborator REST API
//! cargo run --bin hotelops-server --features "rest-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use hotelops_rust::db::{RepositoryConfig, RepositoryFactory};
use hotelops_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Hotel Operations HTTP Server");

    // Select the backend from repository.toml; fall back to local
    let repository = match RepositoryConfig::from_default_location() {
        Ok(config) => RepositoryFactory::from_config(&config).map_err(|e| anyhow::anyhow!(e))?,
        #[cfg(feature = "local-repo")]
        Err(e) => {
            warn!("no repository config ({}), using local backend", e);
            RepositoryFactory::create_local()
        }
        #[cfg(not(feature = "local-repo"))]
        Err(e) => anyhow::bail!("no repository config and no fallback backend: {}", e),
    };
    info!("Repository initialized successfully");

    // Create application state
    let state = AppState::new(repository);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
