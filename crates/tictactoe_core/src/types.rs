//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::InvalidMove;
use crate::position::Position;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Side {
    /// Moves first and plays "X".
    #[display("X")]
    First,
    /// Moves second and plays "O".
    #[display("O")]
    Second,
}

impl Side {
    /// Returns the opponent side.
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Returns the mark drawn for this side.
    pub fn mark(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }

    /// Returns the side that moves on the given ply (0-based).
    pub fn for_ply(ply: usize) -> Self {
        if ply % 2 == 0 { Side::First } else { Side::Second }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a side's mark.
    Marked(Side),
}

impl Cell {
    /// Returns the side occupying this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Marked(side) => Some(side),
        }
    }

    /// Returns true for an empty cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are values: [`Board::with_move`] returns a new board and leaves
/// the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a board with nine empty cells.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Builds a board from raw cells.
    ///
    /// No alternation check is made, so this can describe boards a
    /// session would never reach.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index, or `None` outside 0-8.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Gets the cell at a named position.
    pub fn at(&self, position: Position) -> Cell {
        self.cells[position.index()]
    }

    /// Returns a new board with `side` marked at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfRange`] if `index` is not in 0-8 and
    /// [`InvalidMove::Occupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn with_move(&self, index: usize, side: Side) -> Result<Self, InvalidMove> {
        match self.get(index) {
            None => Err(InvalidMove::OutOfRange(index)),
            Some(Cell::Marked(_)) => Err(InvalidMove::Occupied(index)),
            Some(Cell::Empty) => {
                let mut cells = self.cells;
                cells[index] = Cell::Marked(side);
                Ok(Self { cells })
            }
        }
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Counts the marks a side has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Marked(side))
            .count()
    }

    /// Counts the non-empty cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.filled() == CELL_COUNT
    }
}
