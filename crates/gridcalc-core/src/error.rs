//! Error types for gridcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcalc-core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Cell address text does not match `[A-Z][0-9]{1,2}`
    #[error("Malformed cell address: {0}")]
    MalformedAddress(String),

    /// Column index has no single-letter address
    #[error("Column index {0} out of bounds (max: {1})")]
    InvalidColumn(u16, u16),

    /// Row index has no one-or-two-digit address
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Coordinate outside the grid (programming-contract violation by a caller)
    #[error("Coordinate {0} outside grid of {1} rows x {2} columns")]
    OutOfBounds(String, u32, u16),

    /// Grid dimensions exceed the addressable window
    #[error("Invalid grid dimensions: {0} rows x {1} columns")]
    InvalidDimensions(u32, u16),
}
