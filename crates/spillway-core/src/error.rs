//! Error types for spillway-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the engine level
#[derive(Debug, Error)]
pub enum Error {
    /// Row index out of bounds (rows are 1-based)
    #[error("Row index {0} out of bounds (valid: 1..={1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds (columns are 1-based)
    #[error("Column index {0} out of bounds (valid: 1..={1})")]
    ColumnOutOfBounds(u16, u16),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
