//! Main menu screen with the match history list.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use crate::tui::history::{HistoryStatus, MatchHistory};
use crate::tui::screen::{Screen, ScreenTransition};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, strum::Display)]
pub enum MenuOption {
    /// Enter player names and play.
    #[strum(to_string = "Start Game")]
    StartGame,
    /// Fetch the match history again.
    #[strum(to_string = "Refresh History")]
    RefreshHistory,
    /// Leave the shell.
    #[strum(to_string = "Quit")]
    Quit,
}

/// State for the main menu screen.
#[derive(Debug, Default)]
pub struct MainMenuScreen {
    selected: usize,
}

impl MainMenuScreen {
    /// Creates the menu with the first option selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently selected menu option.
    pub fn selected_option(&self) -> MenuOption {
        MenuOption::iter()
            .nth(self.selected)
            .unwrap_or(MenuOption::StartGame)
    }

    fn select_previous(&mut self) {
        let count = MenuOption::iter().count();
        self.selected = (self.selected + count - 1) % count;
    }

    fn select_next(&mut self) {
        let count = MenuOption::iter().count();
        self.selected = (self.selected + 1) % count;
    }

    fn choose(option: MenuOption) -> ScreenTransition {
        info!(option = %option, "Menu option selected");
        match option {
            MenuOption::StartGame => ScreenTransition::GoToPlayerNames,
            MenuOption::RefreshHistory => ScreenTransition::RefreshHistory,
            MenuOption::Quit => ScreenTransition::Quit,
        }
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip(self, frame, history))]
    fn render(&self, frame: &mut Frame, history: &MatchHistory) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Tic-Tac-Toe")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = MenuOption::iter()
            .map(|opt| ListItem::new(opt.to_string()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(status) = history.status_line() {
            let color = match history.status() {
                HistoryStatus::Failed(_) => Color::Red,
                _ => Color::DarkGray,
            };
            lines.push(Line::styled(status, Style::default().fg(color)));
        }
        lines.extend(history.lines().into_iter().map(Line::from));
        let list = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Match History"));
        frame.render_widget(list, chunks[2]);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | s: Start | r: Refresh | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => Self::choose(self.selected_option()),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::choose(MenuOption::StartGame),
            KeyCode::Char('r') | KeyCode::Char('R') => Self::choose(MenuOption::RefreshHistory),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
