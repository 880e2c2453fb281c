use thiserror::Error;

use crate::grid::Point;

/// Result type for grid and solver operations
pub type Result<T> = std::result::Result<T, MazeError>;

/// Errors reported back to the caller. None of them leave the grid modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Grid size must be between 5 and 50 for both rows and columns, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Please set start and end points!")]
    MissingEndpoints,

    #[error("Point ({}, {}) is outside the {rows}x{columns} grid", .point.row, .point.col)]
    OutOfBounds {
        point: Point,
        rows: usize,
        columns: usize,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unexpected character {found:?} at row {row}, column {col}")]
    Parse { row: usize, col: usize, found: char },
}
