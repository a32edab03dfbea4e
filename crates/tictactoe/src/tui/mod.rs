//! Terminal presentation shell.

mod board;
mod controller;
mod events;
mod history;
mod input;
mod screen;
mod screens;

pub use board::{center_rect, draw_board};
pub use controller::{ActiveScreen, ShellController};
pub use events::{HistoryEvent, HistoryTasks};
pub use history::{HistoryStatus, MatchHistory};
pub use input::move_cursor;
pub use screen::{SaveTicket, Screen, ScreenTransition};
pub use screens::{
    GameScreen, MainMenuScreen, MenuOption, ModalChoice, NAMES_REQUIRED, NameField,
    PlayerNamesScreen, SaveStatus,
};

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::history_client::{HistoryClient, HistoryStore};

/// Sends logs to `path` so they do not draw over the UI.
///
/// # Errors
///
/// Fails if the log file cannot be created.
pub fn init_file_logging(path: &str) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Runs the shell against the history store named in `config`.
///
/// # Errors
///
/// Fails if the terminal cannot be set up or drawn to. Network errors
/// never end the shell.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run_shell(config: &AppConfig) -> Result<()> {
    init_file_logging(config.log_file())?;
    info!("Starting tic-tac-toe shell");

    let client = HistoryClient::new(config.server_url()).with_limit(*config.history_limit());
    let store: Arc<dyn HistoryStore> = Arc::new(client);
    let mut controller = ShellController::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Shell exited with error");
    }
    info!("Shell stopped");
    result
}
