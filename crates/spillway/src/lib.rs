//! # spillway
//!
//! A Rust library for building paginated, multi-sheet spreadsheet exports.
//!
//! Spillway orchestrates data exports on top of an in-memory spreadsheet
//! engine: you declare a column schema, append field-keyed rows, and the
//! workbook spills into fresh sheets whenever the active sheet reaches its
//! row limit, re-writing headers on every spill sheet.
//!
//! ## Features
//!
//! - Automatic pagination with a configurable rows-per-sheet limit
//! - Column schemas with typed coercion and header rows
//! - Sparse style rules addressed by column index or header name
//! - Totals rows, range style validation, column widths by name
//! - Cooperative per-row cancellation
//! - XLSX output (Office Open XML)
//!
//! ## Example
//!
//! ```rust
//! use spillway::prelude::*;
//!
//! let schema = ColumnSchema::new()
//!     .with_column(ColumnDefinition::text("sku", "SKU"))
//!     .with_column(ColumnDefinition::number("qty", "Quantity"));
//!
//! let mut workbook = ExportWorkbook::new();
//! workbook.set_max_rows_per_sheet(100).unwrap();
//! workbook.set_columns(&schema).unwrap();
//!
//! let rows: Vec<RowRecord> = (0..250)
//!     .map(|i| RowRecord::new().with("sku", format!("SKU-{i}")).with("qty", i))
//!     .collect();
//! workbook.add_data(&rows, &schema, &CancelToken::new()).unwrap();
//!
//! // 250 rows at 99 data rows per sheet (row 1 is the header)
//! assert_eq!(workbook.sheet_count(), 3);
//! // workbook.save_to_file("export.xlsx").unwrap();
//! ```

pub mod cancel;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod rules;
pub mod schema;
pub mod workbook;

pub use cancel::CancelToken;
pub use engine::{EngineSheet, SpreadsheetEngine};
pub use error::{ExportError, Result};
pub use rules::{ColumnRef, StyleRule};
pub use schema::{ColumnDefinition, ColumnSchema, RowRecord};
pub use workbook::ExportWorkbook;

// Re-export engine types
pub use spillway_core::{
    Alignment,
    BorderLineStyle,
    BorderStyle,
    // Cell types
    CellType,
    CellValue,
    Color,
    FillStyle,
    FontStyle,
    // Engine types
    GridSheet,
    GridWorkbook,
    HorizontalAlignment,
    // Style types
    Style,
    StylePatch,
    StylePool,
    VerticalAlignment,
    MAX_COLS,
    // Constants
    MAX_ROWS,
};

// Re-export I/O types
pub use spillway_xlsx::{XlsxError, XlsxWriter};
