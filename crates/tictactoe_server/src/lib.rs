//! Tic-tac-toe history store.
//!
//! Persists finished-game records in SQLite and serves them over HTTP:
//!
//! - `GET  /api/tictactoe/history` lists stored entries, oldest first
//! - `POST /api/tictactoe/history` validates and stores a record
//! - `GET  /health` liveness probe

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod db;
mod history_service;
mod routes;
mod server;

pub use db::{DbError, DbErrorKind, HistoryRepository, HistoryRow, MIGRATIONS, NewHistoryRow};
pub use history_service::{HistoryService, StoreError};
pub use routes::{ApiError, ErrorResponse, HEALTH_PATH, HISTORY_PATH, HistoryQuery, router};
pub use server::{ServerConfig, open_service, serve};
