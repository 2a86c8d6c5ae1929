//! Error type shared by the engine, the text parser and the spawner.

use thiserror::Error;

/// Everything that can be rejected by the grid engine.
///
/// Moves themselves never fail; only construction, parsing and restoring
/// a snapshot can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    #[error("grid size must be at least 1")]
    ZeroSize,

    /// A row does not have as many cells as there are rows.
    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A snapshot taken from a grid of a different size.
    #[error("snapshot is {found}x{found}, grid is {expected}x{expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A token in a text board that is not a non-negative integer.
    #[error("invalid cell '{token}' in row {row} col {col}")]
    InvalidCell {
        row: usize,
        col: usize,
        token: String,
    },

    /// A direction name outside UP, DOWN, LEFT, RIGHT.
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
}
