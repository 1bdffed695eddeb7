//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while writing an XLSX document
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid document structure
    #[error("Invalid XLSX structure: {0}")]
    InvalidStructure(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] spillway_core::Error),
}
