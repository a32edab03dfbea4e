//! Session phases and terminal results.

use serde::{Deserialize, Serialize};

use crate::rules::Evaluation;
use crate::types::Side;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A side completed a line.
    Win {
        /// The winning side.
        side: Side,
        /// How many marks the winner had on the board.
        winning_move_count: usize,
    },
    /// The board filled up with no complete line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win { side, .. } => Some(*side),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win {
                side,
                winning_move_count,
            } => write!(f, "{} wins in {} moves", side, winning_move_count),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// The immutable result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalResult {
    outcome: Outcome,
    total_moves: usize,
}

impl TerminalResult {
    /// Builds a terminal result from an evaluation, or `None` if the game
    /// is still in progress.
    pub fn from_evaluation(evaluation: Evaluation, total_moves: usize) -> Option<Self> {
        let outcome = match evaluation {
            Evaluation::InProgress => return None,
            Evaluation::Win {
                side,
                winning_move_count,
            } => Outcome::Win {
                side,
                winning_move_count,
            },
            Evaluation::Draw => Outcome::Draw,
        };
        Some(Self {
            outcome,
            total_moves,
        })
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Total plies played by both sides.
    pub fn total_moves(&self) -> usize {
        self.total_moves
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the given side to move.
    AwaitingMove(Side),
    /// The game is over. Absorbing until reset.
    Finished(TerminalResult),
}
