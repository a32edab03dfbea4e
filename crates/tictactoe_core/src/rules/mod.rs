//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules never look at move order; the
//! board alone decides whether the game is over.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{Board, Side};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// No line is complete and at least one cell is empty.
    InProgress,
    /// A side completed a line.
    Win {
        /// The side owning the first complete line in scan order.
        side: Side,
        /// How many marks the winner has on the board.
        winning_move_count: usize,
    },
    /// Every cell is marked and no line is complete.
    Draw,
}

impl Evaluation {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Evaluation::InProgress)
    }
}

/// Evaluates a board for a terminal condition.
///
/// Lines are scanned in [`LINES`] order and the first complete one decides
/// the winner, so a malformed board with two complete lines resolves to
/// whichever comes first.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some(side) = check_winner(board) {
        return Evaluation::Win {
            side,
            winning_move_count: board.count(side),
        };
    }

    if is_full(board) {
        Evaluation::Draw
    } else {
        Evaluation::InProgress
    }
}
