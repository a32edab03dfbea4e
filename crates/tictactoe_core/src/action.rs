//! Move outcomes and the errors a move can raise.

use crate::record::SessionResultRecord;

/// Why a board rejected a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMove {
    /// The index is outside 0-8.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The cell at the index already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),
}

/// Error that can occur when applying a move to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Out-of-range index or occupied cell.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// A move was attempted after the session reached a terminal state.
    #[display("Game is already over")]
    SessionAlreadyFinished,
}

impl From<InvalidMove> for MoveError {
    fn from(err: InvalidMove) -> Self {
        Self::InvalidMove(err)
    }
}

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on with the other side to move.
    Continued,
    /// The move ended the game; the record is ready to persist.
    Finished(SessionResultRecord),
}

impl MoveOutcome {
    /// Returns the record if this move finished the game.
    pub fn record(&self) -> Option<&SessionResultRecord> {
        match self {
            MoveOutcome::Continued => None,
            MoveOutcome::Finished(record) => Some(record),
        }
    }
}
