//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use super::win::check_winner;
use crate::types::Board;

/// Checks if the board is full (all cells marked).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no complete line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Side};

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::empty().with_move(4, Side::First).expect("Valid move");
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let x = Cell::Marked(Side::First);
        let o = Cell::Marked(Side::Second);
        let board = Board::from_cells([x, o, x, x, o, o, o, x, x]);
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let x = Cell::Marked(Side::First);
        let o = Cell::Marked(Side::Second);
        let board = Board::from_cells([x, x, x, o, o, x, o, x, o]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
