//! In-memory grid engine
//!
//! [`GridWorkbook`] and [`GridSheet`] form the default spreadsheet engine:
//! a sparse, 1-based cell grid with per-sheet style pools and column widths.
//! The export facade drives it through its engine traits, and the XLSX
//! writer serializes it.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::style::{Style, StylePatch, StylePool};
use crate::value::CellValue;
use crate::{MAX_COLS, MAX_ROWS};

/// A single cell: value plus style pool index
#[derive(Debug, Clone)]
pub struct Cell {
    /// Cell value
    pub value: CellValue,
    /// Index into the owning sheet's style pool (0 = default)
    pub style_index: u32,
}

impl Cell {
    fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }
}

/// One sheet of a [`GridWorkbook`]
///
/// Rows and columns are 1-based throughout; `(1, 1)` is the top-left cell.
/// Cells are stored sparsely, ordered row-major so serialization walks them
/// without a sort pass.
#[derive(Debug)]
pub struct GridSheet {
    /// Sheet name
    name: String,
    /// Sparse cells, keyed (row, col)
    cells: BTreeMap<(u32, u16), Cell>,
    /// Deduplicated styles
    styles: StylePool,
    /// Custom column widths in pixels, keyed by 1-based column
    column_widths_px: BTreeMap<u16, u32>,
}

impl GridSheet {
    /// Create a new empty sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            styles: StylePool::new(),
            column_widths_px: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a cell value, keeping any style already applied to the cell
    pub fn set_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        validate_position(row, col)?;
        self.cells
            .entry((row, col))
            .and_modify(|c| c.value = value.clone())
            .or_insert_with(|| Cell::new(value));
        Ok(())
    }

    /// Get a cell, if it exists
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a cell value, if the cell exists
    pub fn cell_value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col)).map(|c| &c.value)
    }

    /// Get the resolved style of a cell (default style for absent cells)
    pub fn cell_style(&self, row: u32, col: u16) -> &Style {
        let idx = self
            .cells
            .get(&(row, col))
            .map(|c| c.style_index)
            .unwrap_or(0);
        self.styles
            .get(idx)
            .unwrap_or_else(|| self.styles.default_style())
    }

    /// Apply a sparse style patch to a cell
    ///
    /// Attributes the patch leaves unset keep their current value. The cell
    /// is created (empty) if it does not exist yet, so style-only cells are
    /// preserved.
    pub fn apply_style(&mut self, row: u32, col: u16, patch: &StylePatch) -> Result<()> {
        validate_position(row, col)?;
        let mut style = self.cell_style(row, col).clone();
        style.apply(patch);
        let idx = self.styles.get_or_insert(style);
        self.cells
            .entry((row, col))
            .or_insert_with(|| Cell::new(CellValue::Empty))
            .style_index = idx;
        Ok(())
    }

    /// Set a column width in pixels
    pub fn set_column_width_px(&mut self, col: u16, width_px: u32) -> Result<()> {
        validate_position(1, col)?;
        self.column_widths_px.insert(col, width_px);
        Ok(())
    }

    /// Get a column width in pixels, if customized
    pub fn column_width_px(&self, col: u16) -> Option<u32> {
        self.column_widths_px.get(&col).copied()
    }

    /// All custom column widths (column → pixels), ordered by column
    pub fn column_widths_px(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.column_widths_px.iter().map(|(&c, &w)| (c, w))
    }

    /// The style pool backing this sheet
    pub fn style_pool(&self) -> &StylePool {
        &self.styles
    }

    /// Iterate over all cells in row-major order: (row, col, cell)
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn validate_position(row: u32, col: u16) -> Result<()> {
    if row < 1 || row > MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS));
    }
    if col < 1 || col > MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
    }
    Ok(())
}

/// The in-memory workbook engine
///
/// Always holds at least one sheet; sheets are append-only, matching the
/// export model where pagination only ever adds sheets.
#[derive(Debug)]
pub struct GridWorkbook {
    sheets: Vec<GridSheet>,
}

impl GridWorkbook {
    /// Create a new workbook with one default sheet
    pub fn new() -> Self {
        Self {
            sheets: vec![GridSheet::new("Sheet1")],
        }
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&GridSheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut GridSheet> {
        self.sheets.get_mut(index)
    }

    /// Append a new sheet, returning its index
    pub fn add_sheet(&mut self) -> usize {
        let index = self.sheets.len();
        let name = self.generate_sheet_name();
        self.sheets.push(GridSheet::new(name));
        index
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &GridSheet> {
        self.sheets.iter()
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.sheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if !self.sheets.iter().any(|s| s.name() == name) {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for GridWorkbook {
    fn default() -> Self {
        Self::new()
    }
}
