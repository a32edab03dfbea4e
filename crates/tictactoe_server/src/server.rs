//! History store startup.

use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::db::HistoryRepository;
use crate::history_service::HistoryService;
use crate::routes::{HISTORY_PATH, router};

/// Where the history store listens and keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,
    /// Port to bind.
    port: u16,
    /// SQLite database file.
    db_path: String,
}

/// Opens the database, applies migrations and builds the service.
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
#[instrument(skip(config), fields(db_path = %config.db_path()))]
pub fn open_service(config: &ServerConfig) -> Result<HistoryService> {
    let repository = HistoryRepository::new(config.db_path().clone())
        .context("Invalid database path")?;
    repository
        .run_migrations()
        .context("Failed to migrate history database")?;
    Ok(HistoryService::new(repository))
}

/// Runs the history store until Ctrl+C.
///
/// # Errors
///
/// Fails if the database cannot be prepared or the listener cannot bind.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let service = open_service(&config)?;
    let app = router(service);

    let listener = TcpListener::bind((config.host().as_str(), *config.port()))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host(), config.port()))?;
    let addr = listener.local_addr()?;
    info!(%addr, "History store ready at http://{}{}", addr, HISTORY_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("History store failed")?;

    info!("History store stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
