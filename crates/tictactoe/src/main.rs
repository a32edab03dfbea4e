//! tictactoe - unified CLI
//!
//! Runs the history store, the terminal shell, or prints match history.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe::{AppConfig, Cli, Command, HistoryClient, HistoryStore, tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?
        .with_process_env();

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => run_server(config, host, port, db_path).await,
        Command::Play { server_url } => {
            let config = apply_server_url(config, server_url);
            tui::run_shell(&config).await
        }
        Command::History { server_url, limit } => {
            let config = apply_server_url(config, server_url);
            print_history(&config, limit).await
        }
    }
}

fn apply_server_url(config: AppConfig, server_url: Option<String>) -> AppConfig {
    match server_url {
        Some(url) => config.with_server_url(url),
        None => config,
    }
}

/// Run the history store
async fn run_server(
    config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    db_path: Option<String>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_server=debug")),
        )
        .init();

    let mut config = config;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(db_path) = db_path {
        config = config.with_db_path(db_path);
    }
    config.validate()?;

    info!(host = %config.host(), port = config.port(), db_path = %config.db_path(), "Starting history store");
    tictactoe_server::serve(config.server_config()).await
}

/// Print stored matches, oldest first
#[instrument(skip(config), fields(server_url = %config.server_url()))]
async fn print_history(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let client = HistoryClient::new(config.server_url())
        .with_limit(limit.unwrap_or(*config.history_limit()));
    let entries = client
        .fetch_history()
        .await
        .context("Failed to fetch match history")?;

    if entries.is_empty() {
        println!("No matches played yet.");
        return Ok(());
    }
    for (n, entry) in entries.iter().enumerate() {
        println!("{:>3}. {}", n + 1, entry.summary());
    }
    Ok(())
}
