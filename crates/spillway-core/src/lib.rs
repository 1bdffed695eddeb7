//! # spillway-core
//!
//! Engine-level data structures for the spillway export library.
//!
//! This crate provides the types underneath the export facade:
//! - [`CellValue`] and [`CellType`] - Cell values and declared-type coercion
//! - [`Style`], [`StylePatch`] - Cell formatting and sparse style patches
//! - [`GridWorkbook`], [`GridSheet`] - The in-memory spreadsheet engine
//!
//! ## Example
//!
//! ```rust
//! use spillway_core::{CellValue, GridWorkbook};
//!
//! let mut workbook = GridWorkbook::new();
//! let sheet = workbook.sheet_mut(0).unwrap();
//!
//! // Coordinates are 1-based: (1, 1) is the top-left cell
//! sheet.set_cell(1, 1, CellValue::from("Hello")).unwrap();
//! sheet.set_cell(1, 2, CellValue::from(42.0)).unwrap();
//! ```

pub mod error;
pub mod grid;
pub mod style;
pub mod value;

// Re-exports for convenience
pub use error::{Error, Result};
pub use grid::{Cell, GridSheet, GridWorkbook};
pub use style::{
    Alignment, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle, HorizontalAlignment,
    Style, StylePatch, StylePool, VerticalAlignment,
};
pub use value::{CellType, CellValue};

/// Maximum number of rows in a sheet (1-based, Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet (1-based, Excel limit)
pub const MAX_COLS: u16 = 16_384;
