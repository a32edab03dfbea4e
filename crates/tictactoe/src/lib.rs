//! Two-player tic-tac-toe with persistent match history.
//!
//! This crate wires the pure game core ([`tictactoe_core`]) and the history
//! store ([`tictactoe_server`]) into a single binary:
//!
//! - `tictactoe serve` runs the history store
//! - `tictactoe play` runs the terminal shell
//! - `tictactoe history` prints stored matches

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod history_client;
pub mod tui;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError, DB_PATH_ENV, SERVER_URL_ENV};
pub use history_client::{HistoryClient, HistoryError, HistoryStore};
