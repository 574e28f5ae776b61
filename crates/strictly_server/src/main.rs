//! Strictly Farkle - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_farkle::{GameManager, Roll, score};
use strictly_server::{AppState, ServerConfig, router};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            public_url,
            seed,
        } => {
            initialize_tracing();
            let config = load_config(&config)?;
            let config = apply_overrides(config, host, port, public_url, seed);
            run_server(config).await
        }
        Command::Score { faces } => score_faces(&faces),
    }
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_farkle=debug,strictly_server=debug")),
        )
        .init();
}

/// Loads config from file, falling back to defaults when it is absent.
#[instrument(skip_all, fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<ServerConfig> {
    if path.exists() {
        Ok(ServerConfig::from_file(path)?)
    } else {
        warn!("Config file not found, using defaults");
        Ok(ServerConfig::default())
    }
}

fn apply_overrides(
    mut config: ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    public_url: Option<String>,
    seed: Option<u64>,
) -> ServerConfig {
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(url) = public_url {
        config = config.with_public_url(url);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
}

/// Run the HTTP game server
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let base_url = config.base_url();
    let manager = GameManager::with_roller_factory(&base_url, config.roller_factory());
    let app = router(AppState::from_manager(manager));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(%base_url, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Scores one roll given on the command line.
fn score_faces(faces: &[u8]) -> Result<()> {
    let roll = Roll::from_slice(faces)?;
    let outcome = score(&roll);
    if outcome.busted {
        println!("{roll}: Farkle");
    } else {
        println!("{roll}: {} points ({})", outcome.points, outcome.combo);
    }
    Ok(())
}
