//! # spillway-xlsx
//!
//! XLSX (Office Open XML) writer for the spillway export library.
//!
//! Serializes a [`spillway_core::GridWorkbook`] into the ZIP-packaged OOXML
//! format: workbook and worksheet parts, a deduplicated styles part, custom
//! column widths, and inline strings. Write-only; reading spreadsheet files
//! is out of scope.

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
