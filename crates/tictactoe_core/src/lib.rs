//! Tic-tac-toe core - board, rules and session controller.
//!
//! Everything here is synchronous and free of I/O. A shell drives a
//! [`Session`] with [`Session::apply_move`]; when a move finishes the game
//! the session returns a [`SessionResultRecord`] for the caller to persist.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{MoveOutcome, Session};
//!
//! let mut session = Session::new("Ann", "Bob");
//! for index in [0, 3, 1, 4] {
//!     assert_eq!(session.apply_move(index), Ok(MoveOutcome::Continued));
//! }
//! let outcome = session.apply_move(2).unwrap();
//! let record = outcome.record().unwrap();
//! assert_eq!(record.result_message(), "Ann (X) wins in 3 moves!");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod phases;
mod position;
mod record;
mod session;
mod types;

pub mod rules;

pub use action::{InvalidMove, MoveError, MoveOutcome};
pub use phases::{Outcome, Phase, TerminalResult};
pub use position::Position;
pub use record::{HistoryEntry, RecordError, SessionResultRecord};
pub use rules::{Evaluation, evaluate};
pub use session::Session;
pub use types::{Board, CELL_COUNT, Cell, Side};
