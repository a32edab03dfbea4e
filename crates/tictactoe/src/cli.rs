//! Command-line interface for tictactoe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tic-tac-toe for two players at one keyboard, with match history
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe with persistent match history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the history store (REST API over SQLite)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Play in the terminal
    Play {
        /// History store URL
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Print match history
    History {
        /// History store URL
        #[arg(long)]
        server_url: Option<String>,

        /// Show only the most recent entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["tictactoe", "serve", "--port", "9000", "--db-path", "x.db"])
            .expect("Parse");
        assert_eq!(cli.config, PathBuf::from("tictactoe.toml"));
        match cli.command {
            Command::Serve {
                host,
                port,
                db_path,
            } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert_eq!(db_path.as_deref(), Some("x.db"));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tictactoe",
            "history",
            "--limit",
            "5",
            "--config",
            "other.toml",
        ])
        .expect("Parse");
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.command,
            Command::History {
                limit: Some(5),
                ..
            }
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tictactoe"]).is_err());
    }
}
