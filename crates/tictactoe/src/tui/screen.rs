//! Screen trait and transition type for the shell state machine.

use crossterm::event::KeyEvent;
use derive_new::new;
use ratatui::Frame;
use tictactoe_core::SessionResultRecord;

use crate::tui::history::MatchHistory;

/// Identifies one save request: which game screen asked, and for which of
/// its finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct SaveTicket {
    /// Game screen that requested the save.
    pub game: u64,
    /// Finish count on that screen; bumped by every finish and rematch.
    pub round: u64,
}

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`ShellController`](crate::tui::ShellController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Navigate to player name entry.
    GoToPlayerNames,
    /// Start a game between two validated labels.
    StartGame {
        /// Label for the X player.
        player_one: String,
        /// Label for the O player.
        player_two: String,
    },
    /// Fetch the match history again.
    RefreshHistory,
    /// A game just finished; persist its record and stay on the screen.
    SaveRecord {
        /// Ticket the save result must echo.
        ticket: SaveTicket,
        /// Record of the finished game.
        record: SessionResultRecord,
    },
    /// Exit the shell.
    Quit,
}

/// Trait implemented by each screen in the shell.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, history: &MatchHistory);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;
}
