//! Database repository for match history.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, HistoryRow, NewHistoryRow, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for match history rows.
///
/// Holds only the database path; each call opens its own connection, so the
/// repository is cheap to clone into blocking tasks.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    db_path: String,
}

impl HistoryRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(
                DbErrorKind::Connection,
                "Database path must not be empty",
            ));
        }
        info!(path = %db_path, "Creating HistoryRepository");
        Ok(Self { db_path })
    }

    /// Path of the SQLite database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Applies any pending schema migrations. Returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Inserts a match result and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, row), fields(player_one = %row.player_one(), player_two = %row.player_two()))]
    pub fn insert(&self, row: NewHistoryRow) -> Result<HistoryRow, DbError> {
        debug!("Inserting history row");
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::history_entries::table)
            .values(&row)
            .returning(HistoryRow::as_returning())
            .get_result(&mut conn)?;

        info!(id = stored.id(), "History row stored");
        Ok(stored)
    }

    /// Lists every stored row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<HistoryRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::history_entries::table
            .order(schema::history_entries::id.asc())
            .select(HistoryRow::as_select())
            .load(&mut conn)?;

        debug!(count = rows.len(), "History rows loaded");
        Ok(rows)
    }

    /// Lists the `limit` most recent rows, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_recent(&self, limit: i64) -> Result<Vec<HistoryRow>, DbError> {
        let mut conn = self.connection()?;

        let mut rows = schema::history_entries::table
            .order(schema::history_entries::id.desc())
            .limit(limit)
            .select(HistoryRow::as_select())
            .load(&mut conn)?;
        rows.reverse();

        debug!(count = rows.len(), limit, "Recent history rows loaded");
        Ok(rows)
    }

    /// Counts stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        let total = schema::history_entries::table
            .count()
            .get_result(&mut conn)?;
        Ok(total)
    }
}
