//! Board and popup rendering helpers.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_core::{Board, Cell, Position, Side};

/// Width of the rendered board in columns.
pub const BOARD_WIDTH: u16 = 29;
/// Height of the rendered board in rows, border included.
pub const BOARD_HEIGHT: u16 = 7;

/// Style for a cell given its contents and highlights.
pub fn cell_style(cell: Cell, is_cursor: bool, is_winning: bool) -> Style {
    let base = match cell {
        Cell::Empty => Style::default().fg(Color::DarkGray),
        Cell::Marked(Side::First) => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        Cell::Marked(Side::Second) => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };
    let base = if is_winning {
        base.bg(Color::Green).fg(Color::Black)
    } else {
        base
    };
    if is_cursor {
        base.bg(Color::White).fg(Color::Black)
    } else {
        base
    }
}

/// Text shown in a cell; empty cells show their keypad digit.
pub fn cell_symbol(cell: Cell, position: Position) -> String {
    match cell {
        Cell::Empty => format!("   {}   ", position.index() + 1),
        Cell::Marked(side) => format!("   {}   ", side.mark()),
    }
}

/// Draws the board centred in `area`.
///
/// `cursor` is highlighted while the game is in progress; `winning` marks
/// the completed line once it is won.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    winning: Option<[usize; 3]>,
) {
    let separator = Line::from(Span::styled(
        "───────┼───────┼───────",
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            let Some(position) = Position::from_row_col(row, col) else {
                continue;
            };
            let cell = board.at(position);
            let is_winning = winning.is_some_and(|line| line.contains(&position.index()));
            let style = cell_style(cell, cursor == Some(position), is_winning);
            spans.push(Span::styled(cell_symbol(cell, position), style));
            if col < 2 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
        }
        lines.push(Line::from(spans));
        if row < 2 {
            lines.push(separator.clone());
        }
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, center_rect(area, BOARD_WIDTH, BOARD_HEIGHT));
}

/// Returns a `width` x `height` rectangle centred in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_symbol() {
        assert_eq!(cell_symbol(Cell::Empty, Position::Center).trim(), "5");
        assert_eq!(
            cell_symbol(Cell::Marked(Side::Second), Position::Center).trim(),
            "O"
        );
    }

    #[test]
    fn test_cursor_wins_over_highlight() {
        let style = cell_style(Cell::Marked(Side::First), true, true);
        assert_eq!(style.bg, Some(Color::White));
        let style = cell_style(Cell::Marked(Side::First), false, true);
        assert_eq!(style.bg, Some(Color::Green));
    }

    #[test]
    fn test_center_rect() {
        let rect = center_rect(Rect::new(0, 0, 100, 40), 20, 10);
        assert_eq!(rect, Rect::new(40, 15, 20, 10));
    }
}
