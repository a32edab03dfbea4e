//! Match history business logic layer.

use derive_more::{Display, Error, From};
use tictactoe_core::{HistoryEntry, RecordError, SessionResultRecord};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, HistoryRepository, NewHistoryRow};

/// Error returned by [`HistoryService`].
#[derive(Debug, Clone, Display, Error, From)]
pub enum StoreError {
    /// The submitted record describes an impossible game.
    #[display("Invalid record: {}", _0)]
    Invalid(RecordError),
    /// The database failed.
    #[display("{}", _0)]
    Storage(DbError),
}

/// Service layer for match history.
///
/// Wraps [`HistoryRepository`] with record validation and the conversion
/// between stored rows and wire-level entries.
#[derive(Debug, Clone)]
pub struct HistoryService {
    repository: HistoryRepository,
}

impl HistoryService {
    /// Creates a new history service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: HistoryRepository) -> Self {
        info!(path = %repository.db_path(), "Creating HistoryService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &HistoryRepository {
        &self.repository
    }

    /// Validates and stores a finished game, returning the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for an impossible record and
    /// [`StoreError::Storage`] if the insert fails.
    #[instrument(skip(self, record), fields(player_one = %record.player_one(), player_two = %record.player_two()))]
    pub fn save(&self, record: &SessionResultRecord) -> Result<HistoryEntry, StoreError> {
        if let Err(e) = record.validate() {
            warn!(error = %e, "Rejecting history record");
            return Err(e.into());
        }

        let row = self.repository.insert(NewHistoryRow::try_from(record)?)?;
        let entry = row.into_entry()?;
        info!(id = ?entry.id(), summary = %entry.summary(), "Match recorded");
        Ok(entry)
    }

    /// Returns stored entries, oldest first.
    ///
    /// With a limit, only the most recent `limit` entries are returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, StoreError> {
        let rows = match limit {
            Some(limit) => {
                let limit = i64::try_from(limit).unwrap_or(i64::MAX);
                self.repository.list_recent(limit)?
            }
            None => self.repository.list()?,
        };

        let entries = rows
            .into_iter()
            .map(|row| row.into_entry())
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = entries.len(), "History loaded");
        Ok(entries)
    }
}
