//! Database models for stored match results.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tictactoe_core::{HistoryEntry, SessionResultRecord};
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

/// A stored match result.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::history_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryRow {
    id: i32,
    player_one: String,
    player_two: String,
    is_one_won: bool,
    is_draw: bool,
    moves: i32,
    played_at: NaiveDateTime,
}

impl HistoryRow {
    /// Converts the row into the wire-level history entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored move count is negative.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn into_entry(self) -> Result<HistoryEntry, DbError> {
        let moves = u32::try_from(self.moves).map_err(|_| {
            DbError::new(
                DbErrorKind::Conversion,
                format!("Row {} has negative move count {}", self.id, self.moves),
            )
        })?;
        let record = SessionResultRecord::new(
            self.player_one,
            self.player_two,
            self.is_one_won,
            self.is_draw,
            moves,
        );
        Ok(HistoryEntry::new(Some(self.id), record, Some(self.played_at)))
    }
}

/// Insertable row for a new match result. `id` and `played_at` come from
/// the database.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::history_entries)]
pub struct NewHistoryRow {
    player_one: String,
    player_two: String,
    is_one_won: bool,
    is_draw: bool,
    moves: i32,
}

impl TryFrom<&SessionResultRecord> for NewHistoryRow {
    type Error = DbError;

    fn try_from(record: &SessionResultRecord) -> Result<Self, Self::Error> {
        let moves = i32::try_from(record.moves()).map_err(|_| {
            DbError::new(
                DbErrorKind::Conversion,
                format!("Move count {} does not fit a stored row", record.moves()),
            )
        })?;
        Ok(Self::new(
            record.player_one().to_string(),
            record.player_two().to_string(),
            record.is_one_won(),
            record.is_draw(),
            moves,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_from_record() {
        let record = SessionResultRecord::new("Ann", "Bob", false, true, 9);
        let row = NewHistoryRow::try_from(&record).expect("Convert");
        assert_eq!(row.player_one(), "Ann");
        assert!(*row.is_draw());
        assert_eq!(*row.moves(), 9);
    }

    #[test]
    fn test_oversized_move_count_rejected() {
        let record = SessionResultRecord::new("Ann", "Bob", true, false, u32::MAX);
        let err = NewHistoryRow::try_from(&record).expect_err("Should not fit");
        assert_eq!(err.kind, DbErrorKind::Conversion);
    }
}
