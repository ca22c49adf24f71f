//! evacroute-server: HTTP front end for hazard-aware evacuation routing
//!
//! Loads the configured floor datasets once at startup and answers route
//! requests against them. Searches run on the blocking thread pool.

mod config;
mod dto;
mod error;
mod routes;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "evacroute-server", version, about = "Evacuation route planning service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "evacroute.toml")]
    config: PathBuf,

    /// Listen address, overrides `server.bind`
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize logging; records from the core crate's `log` calls are bridged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("evacroute_server=info,evacroute_core=info")),
        )
        .init();

    let args = Args::parse();
    info!("Loading configuration from {}", args.config.display());
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let state = AppState::load(&config)?;
    let app = routes::app(state, &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
