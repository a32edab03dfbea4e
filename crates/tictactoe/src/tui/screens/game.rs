//! Game screen: board, turn indicator, and the end-of-game modal.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tictactoe_core::{MoveOutcome, Position, Session, Side};
use tracing::{debug, info, instrument, warn};

use crate::tui::board::{center_rect, draw_board};
use crate::tui::history::MatchHistory;
use crate::tui::input::move_cursor;
use crate::tui::screen::{SaveTicket, Screen, ScreenTransition};

/// Buttons on the end-of-game modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalChoice {
    /// Clear the board and play again with the same players.
    #[default]
    Rematch,
    /// Return to the main menu.
    MainMenu,
}

impl ModalChoice {
    fn other(self) -> Self {
        match self {
            ModalChoice::Rematch => ModalChoice::MainMenu,
            ModalChoice::MainMenu => ModalChoice::Rematch,
        }
    }
}

/// Progress of persisting the finished game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    /// No finished game to save.
    #[default]
    None,
    /// Save task running.
    Pending,
    /// Stored by the history store.
    Saved,
    /// Save failed with this message.
    Failed(String),
}

/// State for the game screen.
#[derive(Debug, Getters)]
pub struct GameScreen {
    game_id: u64,
    round: u64,
    session: Session,
    cursor: Position,
    choice: ModalChoice,
    save_status: SaveStatus,
}

impl GameScreen {
    /// Starts a game between two labels. `game_id` must differ between
    /// screens so their save results cannot be confused.
    #[instrument(skip(player_one, player_two))]
    pub fn new(game_id: u64, player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        Self {
            game_id,
            round: 0,
            session: Session::new(player_one, player_two),
            cursor: Position::Center,
            choice: ModalChoice::default(),
            save_status: SaveStatus::None,
        }
    }

    /// Ticket of the save this screen is waiting for, if any.
    pub fn pending_ticket(&self) -> Option<SaveTicket> {
        (self.save_status == SaveStatus::Pending).then(|| SaveTicket::new(self.game_id, self.round))
    }

    /// Records the outcome of the save task.
    ///
    /// Results for any ticket other than the pending one are ignored.
    /// Returns whether the result was applied.
    #[instrument(skip(self, result))]
    pub fn set_save_result(&mut self, ticket: SaveTicket, result: Result<(), String>) -> bool {
        if self.pending_ticket() != Some(ticket) {
            debug!("Ignoring save result for another game");
            return false;
        }
        self.save_status = match result {
            Ok(()) => SaveStatus::Saved,
            Err(e) => SaveStatus::Failed(e),
        };
        true
    }

    /// Plays the current side at `position`.
    ///
    /// Occupied cells are ignored here before the session sees them.
    #[instrument(skip(self), fields(position = %position))]
    fn place(&mut self, position: Position) -> ScreenTransition {
        if !self.session.board().at(position).is_empty() {
            debug!("Ignoring click on occupied cell");
            return ScreenTransition::Stay;
        }
        match self.session.apply_move(position.index()) {
            Ok(MoveOutcome::Continued) => ScreenTransition::Stay,
            Ok(MoveOutcome::Finished(record)) => {
                info!(summary = %record.summary(), "Game finished");
                self.choice = ModalChoice::default();
                self.round += 1;
                self.save_status = SaveStatus::Pending;
                ScreenTransition::SaveRecord {
                    ticket: SaveTicket::new(self.game_id, self.round),
                    record,
                }
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                ScreenTransition::Stay
            }
        }
    }

    #[instrument(skip(self))]
    fn rematch(&mut self) -> ScreenTransition {
        info!("Rematch");
        self.session.reset();
        self.cursor = Position::Center;
        self.choice = ModalChoice::default();
        self.round += 1;
        self.save_status = SaveStatus::None;
        ScreenTransition::Stay
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.choice = self.choice.other();
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.choice {
                ModalChoice::Rematch => self.rematch(),
                ModalChoice::MainMenu => ScreenTransition::GoToMainMenu,
            },
            KeyCode::Char('r') | KeyCode::Char('R') => self.rematch(),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => ScreenTransition::GoToMainMenu,
            _ => ScreenTransition::Stay,
        }
    }

    fn players_line(&self) -> Line<'static> {
        let active = (!self.session.is_finished()).then(|| self.session.turn());
        let styled = |side: Side| {
            let text = format!(" {} ({}) ", self.session.label_for(side), side);
            if active == Some(side) {
                Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(text, Style::default().fg(Color::Gray))
            }
        };
        Line::from(vec![styled(Side::First), Span::raw("  vs  "), styled(Side::Second)])
    }

    fn status_text(&self) -> String {
        match self.session.result_message() {
            Some(message) => message,
            None => {
                let side = self.session.turn();
                format!("{} to move ({})", self.session.label_for(side), side)
            }
        }
    }

    fn save_line(&self) -> Option<Line<'static>> {
        match &self.save_status {
            SaveStatus::None => None,
            SaveStatus::Pending => Some(Line::styled(
                "Saving match...",
                Style::default().fg(Color::DarkGray),
            )),
            SaveStatus::Saved => Some(Line::styled(
                "Match saved",
                Style::default().fg(Color::Green),
            )),
            SaveStatus::Failed(e) => Some(Line::styled(
                format!("Could not save match: {}", e),
                Style::default().fg(Color::Red),
            )),
        }
    }

    fn render_modal(&self, frame: &mut Frame) {
        let area = center_rect(frame.area(), 44, 8);
        frame.render_widget(Clear, area);

        let button = |choice: ModalChoice, label: &'static str| {
            if self.choice == choice {
                Span::styled(
                    format!("[ {} ]", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!("  {}  ", label))
            }
        };

        let mut lines = vec![
            Line::styled(
                self.status_text(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::from(vec![
                button(ModalChoice::Rematch, "Rematch"),
                Span::raw("   "),
                button(ModalChoice::MainMenu, "Main Menu"),
            ]),
        ];
        if let Some(save) = self.save_line() {
            lines.push(Line::raw(""));
            lines.push(save);
        }

        let modal = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title("Game Over"),
            );
        frame.render_widget(modal, area);
    }
}

impl Screen for GameScreen {
    #[instrument(skip(self, frame, _history))]
    fn render(&self, frame: &mut Frame, _history: &MatchHistory) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let players = Paragraph::new(self.players_line())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));
        frame.render_widget(players, chunks[0]);

        let finished = self.session.is_finished();
        draw_board(
            frame,
            chunks[1],
            self.session.board(),
            (!finished).then_some(self.cursor),
            self.session.winning_line(),
        );

        let mut status = vec![Line::styled(
            self.status_text(),
            Style::default().fg(Color::Yellow),
        )];
        status.extend(self.save_line());
        let status = Paragraph::new(status)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(
            "←↑↓→: Move | Enter/Space: Place | 1-9: Place | r: Reset | m/Esc: Menu",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);

        if finished {
            self.render_modal(frame);
        }
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if self.session.is_finished() {
            return self.handle_modal_key(key);
        }
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Char(c @ '1'..='9') => match Position::from_key(c) {
                Some(position) => {
                    self.cursor = position;
                    self.place(position)
                }
                None => ScreenTransition::Stay,
            },
            KeyCode::Char('r') | KeyCode::Char('R') => self.rematch(),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => ScreenTransition::GoToMainMenu,
            _ => ScreenTransition::Stay,
        }
    }
}
