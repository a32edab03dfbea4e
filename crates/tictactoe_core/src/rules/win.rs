//! Win detection logic for tic-tac-toe.

use tracing::instrument;

use crate::types::{Board, Cell, Side};

/// The eight winning lines, in scan order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first complete line in scan order, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    LINES.into_iter().find(|&[a, b, c]| {
        let cell = board.get(a);
        cell.is_some_and(|found| !found.is_empty()) && cell == board.get(b) && cell == board.get(c)
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(side)` for the owner of the first complete line,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Side> {
    let [a, _, _] = winning_line(board)?;
    board.get(a).and_then(Cell::side)
}
