//! Database persistence layer for match history.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{HistoryRow, NewHistoryRow};
pub use repository::{HistoryRepository, MIGRATIONS};
