//! Game session controller.
//!
//! A [`Session`] owns the board for one pair of players. Moves go through
//! [`Session::apply_move`], which validates before it commits, so a rejected
//! move never touches the board. When a move ends the game the session hands
//! back a [`SessionResultRecord`]; persisting it is the caller's job.

use tracing::{debug, info, instrument, warn};

use crate::action::{MoveError, MoveOutcome};
use crate::phases::{Phase, TerminalResult};
use crate::record::SessionResultRecord;
use crate::rules::{evaluate, winning_line};
use crate::types::{Board, Side};

/// One game between two labelled players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    player_one: String,
    player_two: String,
    board: Board,
    history: Vec<usize>,
    result: Option<TerminalResult>,
}

impl Session {
    /// Starts a session on an empty board with First to move.
    ///
    /// Label content is not validated here; the shell collecting the names
    /// is responsible for rejecting blanks.
    #[instrument(skip(player_one, player_two))]
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        let session = Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
            board: Board::empty(),
            history: Vec::new(),
            result: None,
        };
        debug!(
            player_one = %session.player_one,
            player_two = %session.player_two,
            "Session created"
        );
        session
    }

    /// Places the current side's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SessionAlreadyFinished`] once the game is over,
    /// and [`MoveError::InvalidMove`] for an out-of-range index or an
    /// occupied cell. On error the session is unchanged.
    #[instrument(skip(self), fields(turn = %self.turn(), ply = self.history.len()))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        if self.result.is_some() {
            warn!("Move rejected: session already finished");
            return Err(MoveError::SessionAlreadyFinished);
        }

        let side = self.turn();
        let board = self.board.with_move(index, side).map_err(|e| {
            warn!(error = %e, "Move rejected");
            MoveError::from(e)
        })?;

        self.board = board;
        self.history.push(index);
        debug_assert!(
            marks_balanced(&self.board),
            "Sides must alternate: X={} O={}",
            self.board.count(Side::First),
            self.board.count(Side::Second)
        );

        match TerminalResult::from_evaluation(evaluate(&self.board), self.history.len()) {
            None => {
                debug!(next = %self.turn(), "Move applied");
                Ok(MoveOutcome::Continued)
            }
            Some(result) => {
                self.result = Some(result);
                let record =
                    SessionResultRecord::from_result(&self.player_one, &self.player_two, &result);
                info!(
                    outcome = %result.outcome(),
                    total_moves = result.total_moves(),
                    "Session finished"
                );
                Ok(MoveOutcome::Finished(record))
            }
        }
    }

    /// Clears the board, keeping the same players. Allowed in any phase.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(ply = self.history.len(), "Resetting session");
        self.board = Board::empty();
        self.history.clear();
        self.result = None;
    }

    /// Side to move, derived from the number of plies played.
    ///
    /// After the game ends this is the side that would have moved next.
    pub fn turn(&self) -> Side {
        Side::for_ply(self.history.len())
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.result {
            Some(result) => Phase::Finished(result),
            None => Phase::AwaitingMove(self.turn()),
        }
    }

    /// True once a terminal move has been played.
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Terminal result, once finished.
    pub fn result(&self) -> Option<&TerminalResult> {
        self.result.as_ref()
    }

    /// Record for the finished game, once finished.
    pub fn record(&self) -> Option<SessionResultRecord> {
        self.result
            .map(|r| SessionResultRecord::from_result(&self.player_one, &self.player_two, &r))
    }

    /// End-of-game message, once finished.
    pub fn result_message(&self) -> Option<String> {
        self.record().map(|r| r.result_message())
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Indices played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Number of plies played.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// The complete line that ended the game, if it was won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(&self.board)
    }

    /// Label of player one (X).
    pub fn player_one(&self) -> &str {
        &self.player_one
    }

    /// Label of player two (O).
    pub fn player_two(&self) -> &str {
        &self.player_two
    }

    /// Label of the player using `side`.
    pub fn label_for(&self, side: Side) -> &str {
        match side {
            Side::First => &self.player_one,
            Side::Second => &self.player_two,
        }
    }
}

/// X leads O by zero or one mark.
fn marks_balanced(board: &Board) -> bool {
    let x = board.count(Side::First);
    let o = board.count(Side::Second);
    x == o || x == o + 1
}
