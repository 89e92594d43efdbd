//! stringlab API server entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stringlab_api::{ApiServer, AppState};
use stringlab_config::{ConfigManager, ConfigOverrides};

#[derive(Parser)]
#[command(name = "stringlab-api", version)]
#[command(about = "Analyse, store, and query strings over HTTP")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager
        .load_config(&ConfigOverrides {
            host: cli.host,
            port: cli.port,
            log_level: cli.log_level,
        })
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .init();

    let server = ApiServer::bind(&config, AppState::in_memory())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!(addr = %server.local_addr()?, "stringlab API listening");

    server.serve(shutdown_signal()).await?;
    tracing::info!("stringlab API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
