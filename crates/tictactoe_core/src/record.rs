//! Result records exchanged with the history store.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::phases::{Outcome, TerminalResult};
use crate::types::{CELL_COUNT, Side};

/// Flat record of a finished session, as persisted by the history store.
///
/// On the wire: `{playerOne, playerTwo, isOneWon, isDraw, moves}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResultRecord {
    player_one: String,
    player_two: String,
    is_one_won: bool,
    is_draw: bool,
    moves: u32,
}

impl SessionResultRecord {
    /// Creates a record from raw fields. Use [`validate`](Self::validate)
    /// before trusting records from outside the session controller.
    pub fn new(
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        is_one_won: bool,
        is_draw: bool,
        moves: u32,
    ) -> Self {
        Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
            is_one_won,
            is_draw,
            moves,
        }
    }

    /// Builds the record for a terminal result.
    ///
    /// First maps to player one and Second to player two. `moves` is the
    /// winner's mark count for a win and the total ply count for a draw.
    #[instrument(skip(player_one, player_two))]
    pub fn from_result(player_one: &str, player_two: &str, result: &TerminalResult) -> Self {
        let (is_one_won, is_draw, moves) = match result.outcome() {
            Outcome::Win {
                side,
                winning_move_count,
            } => (*side == Side::First, false, *winning_move_count),
            Outcome::Draw => (false, true, result.total_moves()),
        };
        Self::new(player_one, player_two, is_one_won, is_draw, moves as u32)
    }

    /// Label of player one (X).
    pub fn player_one(&self) -> &str {
        &self.player_one
    }

    /// Label of player two (O).
    pub fn player_two(&self) -> &str {
        &self.player_two
    }

    /// True if player one won.
    pub fn is_one_won(&self) -> bool {
        self.is_one_won
    }

    /// True if the game was drawn.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// Winner's mark count, or 9 for a draw.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The winning side, or `None` for a draw.
    pub fn winner_side(&self) -> Option<Side> {
        match (self.is_draw, self.is_one_won) {
            (true, _) => None,
            (false, true) => Some(Side::First),
            (false, false) => Some(Side::Second),
        }
    }

    /// Label of the winner, or `None` for a draw.
    pub fn winner_label(&self) -> Option<&str> {
        self.winner_side().map(|side| self.label_for(side))
    }

    /// Label of the loser, or `None` for a draw.
    pub fn loser_label(&self) -> Option<&str> {
        self.winner_side().map(|side| self.label_for(side.opponent()))
    }

    /// Label of the player using `side`.
    pub fn label_for(&self, side: Side) -> &str {
        match side {
            Side::First => &self.player_one,
            Side::Second => &self.player_two,
        }
    }

    /// Message shown when the game ends.
    pub fn result_message(&self) -> String {
        match self.winner_side() {
            Some(side) => format!(
                "{} ({}) wins in {} moves!",
                self.label_for(side),
                side,
                self.moves
            ),
            None => format!("A Draw between {} and {}", self.player_one, self.player_two),
        }
    }

    /// One-line description for match history lists.
    pub fn summary(&self) -> String {
        match self.winner_side() {
            Some(side) => format!(
                "{} won against {} in {} moves as {}",
                self.label_for(side),
                self.label_for(side.opponent()),
                self.moves,
                side
            ),
            None => format!(
                "A Draw between {} and {} with {} moves",
                self.player_one, self.player_two, self.moves
            ),
        }
    }

    /// Checks that the record describes a game that could have happened.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] for an empty label, a record that is both a
    /// win and a draw, or a move count no finished game can produce.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.player_one.trim().is_empty() || self.player_two.trim().is_empty() {
            return Err(RecordError::MissingLabel);
        }
        if self.is_draw && self.is_one_won {
            return Err(RecordError::WinAndDraw);
        }
        let allowed = match self.winner_side() {
            None => CELL_COUNT as u32..=CELL_COUNT as u32,
            Some(Side::First) => 3..=5,
            Some(Side::Second) => 3..=4,
        };
        if !allowed.contains(&self.moves) {
            return Err(RecordError::ImpossibleMoveCount(self.moves));
        }
        Ok(())
    }
}

/// Why a result record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RecordError {
    /// A player label is empty.
    #[display("Both player names are required")]
    MissingLabel,
    /// The record claims a win and a draw at once.
    #[display("A game cannot be both won and drawn")]
    WinAndDraw,
    /// No finished game ends with this move count.
    #[display("Impossible move count: {}", _0)]
    ImpossibleMoveCount(#[error(not(source))] u32),
}

/// A record as stored by the history store.
///
/// `id` and `playedAt` are assigned by the store and optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    #[serde(flatten)]
    record: SessionResultRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    played_at: Option<NaiveDateTime>,
}

impl From<SessionResultRecord> for HistoryEntry {
    fn from(record: SessionResultRecord) -> Self {
        Self::new(None, record, None)
    }
}

impl HistoryEntry {
    /// One-line description for match history lists.
    pub fn summary(&self) -> String {
        self.record.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Evaluation;

    fn win(side: Side, marks: usize, total: usize) -> TerminalResult {
        TerminalResult::from_evaluation(
            Evaluation::Win {
                side,
                winning_move_count: marks,
            },
            total,
        )
        .expect("Terminal")
    }

    #[test]
    fn test_record_from_first_win() {
        let record = SessionResultRecord::from_result("Ann", "Bob", &win(Side::First, 3, 5));
        assert!(record.is_one_won());
        assert!(!record.is_draw());
        assert_eq!(record.moves(), 3);
        assert_eq!(record.winner_label(), Some("Ann"));
        assert_eq!(record.loser_label(), Some("Bob"));
        assert_eq!(record.result_message(), "Ann (X) wins in 3 moves!");
        assert_eq!(record.summary(), "Ann won against Bob in 3 moves as X");
    }

    #[test]
    fn test_record_from_second_win() {
        let record = SessionResultRecord::from_result("Ann", "Bob", &win(Side::Second, 3, 6));
        assert!(!record.is_one_won());
        assert_eq!(record.winner_side(), Some(Side::Second));
        assert_eq!(record.result_message(), "Bob (O) wins in 3 moves!");
        assert_eq!(record.summary(), "Bob won against Ann in 3 moves as O");
    }

    #[test]
    fn test_record_from_draw() {
        let result = TerminalResult::from_evaluation(Evaluation::Draw, 9).expect("Terminal");
        let record = SessionResultRecord::from_result("Ann", "Bob", &result);
        assert!(record.is_draw());
        assert!(!record.is_one_won());
        assert_eq!(record.moves(), 9);
        assert_eq!(record.winner_label(), None);
        assert_eq!(record.result_message(), "A Draw between Ann and Bob");
        assert_eq!(record.summary(), "A Draw between Ann and Bob with 9 moves");
    }

    #[test]
    fn test_wire_format() {
        let record = SessionResultRecord::new("Ann", "Bob", true, false, 4);
        let json = serde_json::to_value(&record).expect("Serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "playerOne": "Ann",
                "playerTwo": "Bob",
                "isOneWon": true,
                "isDraw": false,
                "moves": 4
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        assert_eq!(
            SessionResultRecord::new(" ", "Bob", true, false, 3).validate(),
            Err(RecordError::MissingLabel)
        );
        assert_eq!(
            SessionResultRecord::new("Ann", "Bob", true, true, 9).validate(),
            Err(RecordError::WinAndDraw)
        );
        assert_eq!(
            SessionResultRecord::new("Ann", "Bob", false, true, 7).validate(),
            Err(RecordError::ImpossibleMoveCount(7))
        );
        assert_eq!(
            SessionResultRecord::new("Ann", "Bob", false, false, 5).validate(),
            Err(RecordError::ImpossibleMoveCount(5))
        );
        assert!(SessionResultRecord::new("Ann", "Bob", true, false, 5).validate().is_ok());
    }

    #[test]
    fn test_history_entry_without_metadata() {
        let json = r#"{"playerOne":"Ann","playerTwo":"Bob","isOneWon":false,"isDraw":true,"moves":9}"#;
        let entry: HistoryEntry = serde_json::from_str(json).expect("Deserialize");
        assert_eq!(*entry.id(), None);
        assert_eq!(entry.summary(), "A Draw between Ann and Bob with 9 moves");
    }

    #[test]
    fn test_history_entry_with_metadata() {
        let json = r#"{"id":7,"playerOne":"Ann","playerTwo":"Bob","isOneWon":true,"isDraw":false,"moves":3,"playedAt":"2024-06-01T12:30:00","_id":"ignored"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).expect("Deserialize");
        assert_eq!(*entry.id(), Some(7));
        assert!(entry.played_at().is_some());
        assert_eq!(entry.record().winner_label(), Some("Ann"));
    }
}
