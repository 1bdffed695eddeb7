//! Spreadsheet engine abstraction
//!
//! The export facade drives the underlying spreadsheet engine through these
//! traits instead of a concrete type, so unit tests can inject a fake engine
//! and observe exactly what the orchestrator writes. All coordinates are
//! 1-based; `(1, 1)` is the top-left cell.

use spillway_core::{CellValue, Error, GridSheet, GridWorkbook, StylePatch, MAX_COLS, MAX_ROWS};

/// A workbook-level engine: an ordered, append-only collection of sheets
///
/// Implementations always hold at least one sheet.
pub trait SpreadsheetEngine {
    /// The sheet handle type
    type Sheet: EngineSheet;

    /// Get the number of sheets
    fn sheet_count(&self) -> usize;

    /// Append a new sheet, returning its index
    fn add_sheet(&mut self) -> usize;

    /// Get a sheet by index
    fn sheet(&self, index: usize) -> Option<&Self::Sheet>;

    /// Get a mutable sheet by index
    fn sheet_mut(&mut self, index: usize) -> Option<&mut Self::Sheet>;

    /// Hard row limit per sheet (1-based)
    fn max_rows(&self) -> u32;

    /// Hard column limit per sheet (1-based)
    fn max_columns(&self) -> u16;
}

/// A single sheet of cells
pub trait EngineSheet {
    /// Write a value to a cell, replacing any existing value
    fn set_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), Error>;

    /// Read a cell value, if the cell exists
    fn cell_value(&self, row: u32, col: u16) -> Option<&CellValue>;

    /// Apply a sparse style patch to a cell
    fn apply_style(&mut self, row: u32, col: u16, patch: &StylePatch) -> Result<(), Error>;

    /// Set a column width in pixels
    fn set_column_width_px(&mut self, col: u16, width_px: u32) -> Result<(), Error>;
}

impl SpreadsheetEngine for GridWorkbook {
    type Sheet = GridSheet;

    fn sheet_count(&self) -> usize {
        GridWorkbook::sheet_count(self)
    }

    fn add_sheet(&mut self) -> usize {
        GridWorkbook::add_sheet(self)
    }

    fn sheet(&self, index: usize) -> Option<&GridSheet> {
        GridWorkbook::sheet(self, index)
    }

    fn sheet_mut(&mut self, index: usize) -> Option<&mut GridSheet> {
        GridWorkbook::sheet_mut(self, index)
    }

    fn max_rows(&self) -> u32 {
        MAX_ROWS
    }

    fn max_columns(&self) -> u16 {
        MAX_COLS
    }
}

impl EngineSheet for GridSheet {
    fn set_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), Error> {
        GridSheet::set_cell(self, row, col, value)
    }

    fn cell_value(&self, row: u32, col: u16) -> Option<&CellValue> {
        GridSheet::cell_value(self, row, col)
    }

    fn apply_style(&mut self, row: u32, col: u16, patch: &StylePatch) -> Result<(), Error> {
        GridSheet::apply_style(self, row, col, patch)
    }

    fn set_column_width_px(&mut self, col: u16, width_px: u32) -> Result<(), Error> {
        GridSheet::set_column_width_px(self, col, width_px)
    }
}
