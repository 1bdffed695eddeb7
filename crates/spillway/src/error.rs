//! Export error types

use thiserror::Error;

/// Result type alias using [`ExportError`]
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors surfaced by the export facade
///
/// Validation errors fail before any mutation; [`ExportError::Cancelled`] is
/// the one case that leaves partial (but internally consistent) writes
/// behind.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required collection argument has zero elements
    #[error("{operation}: argument `{argument}` must not be empty")]
    EmptyArgument {
        /// Operation that rejected the argument
        operation: &'static str,
        /// Name of the offending parameter
        argument: &'static str,
    },

    /// Supplied column count exceeds the engine's hard limit
    #[error("Column count {count} exceeds the engine limit of {max}")]
    ColumnCountExceeded {
        /// Number of columns supplied
        count: usize,
        /// Engine column limit
        max: u16,
    },

    /// One or more 1-based range coordinates are out of bounds
    ///
    /// `arguments` lists every offending parameter name, comma-joined, in
    /// the fixed order `row, column, last_row, last_column`.
    #[error("Range coordinates must be >= 1; invalid: {arguments}")]
    RangeOutOfBounds {
        /// Comma-joined offending parameter names
        arguments: String,
    },

    /// A row record is missing a field the schema requires
    #[error("Row {row}: no value for field `{field}`")]
    MissingField {
        /// 1-based position of the row within the `add_data` input
        row: usize,
        /// Source field key that could not be resolved
        field: String,
    },

    /// No header cell matched a name-based column reference
    #[error("No header cell matches column name `{name}`")]
    ColumnNotFound {
        /// The name that failed to resolve
        name: String,
    },

    /// Totals must be set before data is appended to the active sheet
    #[error("Totals row must be set before data is appended")]
    TotalsAfterData,

    /// Rows-per-sheet limit is unusable
    ///
    /// Raised when the limit is zero, exceeds the engine's row limit, or
    /// leaves no room for a data row below the reserved header rows.
    #[error("Invalid rows-per-sheet limit {requested} (engine max {max})")]
    InvalidRowLimit {
        /// Requested limit
        requested: u32,
        /// Engine row limit
        max: u32,
    },

    /// The caller's cancellation signal was observed during `add_data`
    ///
    /// Rows written before the signal was observed remain in the workbook.
    #[error("Export cancelled after {rows_written} row(s)")]
    Cancelled {
        /// Number of rows fully written before cancellation
        rows_written: usize,
    },

    /// Engine-level failure
    #[error(transparent)]
    Engine(#[from] spillway_core::Error),

    /// Serialization failure
    #[error(transparent)]
    Xlsx(#[from] spillway_xlsx::XlsxError),
}
