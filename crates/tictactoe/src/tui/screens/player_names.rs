//! Player name entry screen.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::tui::history::MatchHistory;
use crate::tui::screen::{Screen, ScreenTransition};

/// Shown when either name is blank.
pub const NAMES_REQUIRED: &str = "Both player names are required.";

/// Longest accepted name, in characters.
const MAX_NAME_LEN: usize = 24;

/// Which text field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameField {
    /// Player 1, plays X.
    #[default]
    PlayerOne,
    /// Player 2, plays O.
    PlayerTwo,
}

impl NameField {
    fn other(self) -> Self {
        match self {
            NameField::PlayerOne => NameField::PlayerTwo,
            NameField::PlayerTwo => NameField::PlayerOne,
        }
    }
}

/// State for the player name entry screen.
#[derive(Debug, Default, Getters)]
pub struct PlayerNamesScreen {
    player_one: String,
    player_two: String,
    focus: NameField,
    error: Option<String>,
}

impl PlayerNamesScreen {
    /// Creates the screen with both fields empty.
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            NameField::PlayerOne => &mut self.player_one,
            NameField::PlayerTwo => &mut self.player_two,
        }
    }

    #[instrument(skip(self))]
    fn submit(&mut self) -> ScreenTransition {
        let player_one = self.player_one.trim();
        let player_two = self.player_two.trim();
        if player_one.is_empty() || player_two.is_empty() {
            debug!("Rejecting blank player name");
            self.error = Some(NAMES_REQUIRED.to_string());
            return ScreenTransition::Stay;
        }
        info!(player_one, player_two, "Players entered");
        ScreenTransition::StartGame {
            player_one: player_one.to_string(),
            player_two: player_two.to_string(),
        }
    }

    fn field_widget(&self, field: NameField) -> Paragraph<'_> {
        let (title, value) = match field {
            NameField::PlayerOne => ("Player 1 (X)", &self.player_one),
            NameField::PlayerTwo => ("Player 2 (O)", &self.player_two),
        };
        let focused = self.focus == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if focused {
            format!("{}_", value)
        } else {
            value.clone()
        };
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
    }
}

impl Screen for PlayerNamesScreen {
    #[instrument(skip(self, frame, _history))]
    fn render(&self, frame: &mut Frame, _history: &MatchHistory) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Who is playing?")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        frame.render_widget(self.field_widget(NameField::PlayerOne), chunks[1]);
        frame.render_widget(self.field_widget(NameField::PlayerTwo), chunks[2]);

        if let Some(error) = &self.error {
            let error = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            frame.render_widget(error, chunks[3]);
        }

        let help = Paragraph::new("Tab: Switch field | Enter: Play | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[5]);
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => ScreenTransition::GoToMainMenu,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.other();
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if !c.is_control() => {
                let field = self.focused_mut();
                if field.chars().count() < MAX_NAME_LEN {
                    field.push(c);
                }
                self.error = None;
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut PlayerNamesScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut screen = PlayerNamesScreen::new();
        type_text(&mut screen, "Ann");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "   ");

        assert_eq!(screen.handle_key(press(KeyCode::Enter)), ScreenTransition::Stay);
        assert_eq!(screen.error().as_deref(), Some(NAMES_REQUIRED));
    }

    #[test]
    fn test_valid_names_start_game() {
        let mut screen = PlayerNamesScreen::new();
        type_text(&mut screen, " Ann ");
        screen.handle_key(press(KeyCode::Tab));
        type_text(&mut screen, "Bob");
        assert_eq!(*screen.focus(), NameField::PlayerTwo);

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter)),
            ScreenTransition::StartGame {
                player_one: "Ann".to_string(),
                player_two: "Bob".to_string(),
            }
        );
    }

    #[test]
    fn test_typing_clears_error_and_backspace_edits() {
        let mut screen = PlayerNamesScreen::new();
        screen.handle_key(press(KeyCode::Enter));
        assert!(screen.error().is_some());

        type_text(&mut screen, "Anx");
        assert!(screen.error().is_none());
        screen.handle_key(press(KeyCode::Backspace));
        type_text(&mut screen, "n");
        assert_eq!(screen.player_one(), "Ann");
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut screen = PlayerNamesScreen::new();
        type_text(&mut screen, "Ann");
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc)),
            ScreenTransition::GoToMainMenu
        );
    }
}
