//! Error types for the sliding puzzle crate.

use thiserror::Error;

/// Failures raised while building a `GridState` or interpreting user input.
///
/// Search results are never reported through this type; an insoluble or
/// exhausted search is a regular `SearchOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("row {row} has {found} tiles (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} tiles for the given dimensions, found {found}")]
    TileCount { expected: usize, found: usize },

    #[error("tile {value} is out of range (largest allowed is {max})")]
    TileOutOfRange { value: u32, max: u32 },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u32 },

    #[error("unrecognized token '{token}' in row {row} col {col}")]
    InvalidToken {
        token: String,
        row: usize,
        col: usize,
    },

    #[error("invalid direction '{0}' (expected up, down, left or right)")]
    InvalidDirection(String),
}
