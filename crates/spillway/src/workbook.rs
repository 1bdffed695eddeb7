//! The export workbook facade
//!
//! [`ExportWorkbook`] composes the pagination engine, style resolver, totals
//! manager and range validator over a [`SpreadsheetEngine`]. It owns the
//! per-sheet row cursors; the engine only ever sees absolute coordinates.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use log::{debug, trace};

use crate::cancel::CancelToken;
use crate::engine::{EngineSheet, SpreadsheetEngine};
use crate::error::{ExportError, Result};
use crate::rules::{ColumnRef, StyleRule};
use crate::schema::{ColumnSchema, RowRecord};
use spillway_core::{CellValue, GridWorkbook, StylePatch};
use spillway_xlsx::XlsxWriter;

/// Facade-side bookkeeping for one engine sheet
#[derive(Debug, Clone)]
struct SheetState {
    /// Next writable row (1-based)
    row_cursor: u32,
    /// Row 1 holds headers
    has_header: bool,
    /// Row 2 holds totals
    has_totals: bool,
    /// Data rows have been appended to this sheet
    data_written: bool,
}

impl SheetState {
    fn new() -> Self {
        Self {
            row_cursor: 1,
            has_header: false,
            has_totals: false,
            data_written: false,
        }
    }

    /// First row available for data: totals always occupy row 2, so data
    /// starts at row 3 whenever totals are present, even without a header.
    fn first_data_row(&self) -> u32 {
        if self.has_totals {
            3
        } else if self.has_header {
            2
        } else {
            1
        }
    }
}

/// Paginating multi-sheet export workbook
///
/// Generic over the underlying [`SpreadsheetEngine`]; defaults to the
/// in-memory [`GridWorkbook`] engine, which is the only engine with a save
/// path. The workbook always holds at least one sheet; the *active* sheet is
/// the last one, and `add_data` spills into freshly created sheets once the
/// active sheet's row limit is reached.
///
/// Single-writer: all mutations happen on the calling thread, and callers
/// sharing an instance across threads must serialize access themselves.
///
/// # Example
///
/// ```rust
/// use spillway::{CancelToken, ColumnDefinition, ColumnSchema, ExportWorkbook, RowRecord};
///
/// let schema = ColumnSchema::new()
///     .with_column(ColumnDefinition::text("name", "Name"))
///     .with_column(ColumnDefinition::number("qty", "Quantity"));
///
/// let mut workbook = ExportWorkbook::new();
/// workbook.set_columns(&schema).unwrap();
///
/// let rows = vec![
///     RowRecord::new().with("name", "bolt").with("qty", 12),
///     RowRecord::new().with("name", "nut").with("qty", 40),
/// ];
/// workbook.add_data(&rows, &schema, &CancelToken::new()).unwrap();
///
/// let bytes = workbook.save().unwrap();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug)]
pub struct ExportWorkbook<E: SpreadsheetEngine = GridWorkbook> {
    engine: E,
    states: Vec<SheetState>,
    schema: Option<ColumnSchema>,
    max_rows_per_sheet: u32,
}

impl ExportWorkbook<GridWorkbook> {
    /// Create a workbook over a fresh in-memory grid engine
    pub fn new() -> Self {
        Self::with_engine(GridWorkbook::new())
    }

    /// Serialize the workbook to XLSX bytes
    pub fn save(&self) -> Result<Vec<u8>> {
        debug!("saving workbook ({} sheets)", self.states.len());
        Ok(XlsxWriter::write_bytes(&self.engine)?)
    }

    /// Serialize the workbook to a writer
    pub fn save_as<W: Write + Seek>(&self, writer: W) -> Result<()> {
        debug!("saving workbook ({} sheets)", self.states.len());
        XlsxWriter::write(&self.engine, writer)?;
        Ok(())
    }

    /// Serialize the workbook to a file path
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(spillway_xlsx::XlsxError::from)?;
        self.save_as(file)
    }
}

impl Default for ExportWorkbook<GridWorkbook> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SpreadsheetEngine> ExportWorkbook<E> {
    /// Create a workbook over an existing engine
    ///
    /// The engine's current sheets are adopted as empty sheets with their
    /// cursors at row 1.
    pub fn with_engine(engine: E) -> Self {
        let count = engine.sheet_count().max(1);
        let max_rows = engine.max_rows();
        Self {
            engine,
            states: vec![SheetState::new(); count],
            schema: None,
            max_rows_per_sheet: max_rows,
        }
    }

    /// Access the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configured rows-per-sheet limit
    pub fn max_rows_per_sheet(&self) -> u32 {
        self.max_rows_per_sheet
    }

    /// Set the rows-per-sheet limit (default: the engine's row limit)
    ///
    /// The limit counts all rows, reserved header/totals rows included.
    pub fn set_max_rows_per_sheet(&mut self, limit: u32) -> Result<()> {
        if limit < 1 || limit > self.engine.max_rows() {
            return Err(ExportError::InvalidRowLimit {
                requested: limit,
                max: self.engine.max_rows(),
            });
        }
        self.max_rows_per_sheet = limit;
        Ok(())
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.states.len()
    }

    /// Get the index of the active (last) sheet
    pub fn active_sheet(&self) -> usize {
        self.states.len() - 1
    }

    /// Append a fresh sheet and make it active
    ///
    /// The new sheet has no header: header propagation only happens through
    /// `set_columns_all_sheets` or pagination spills.
    pub fn add_sheet(&mut self) -> usize {
        let index = self.engine.add_sheet();
        self.states.push(SheetState::new());
        index
    }

    // === Column schema ===

    /// Write the header row to the active sheet and store the schema
    pub fn set_columns(&mut self, schema: &ColumnSchema) -> Result<()> {
        self.validate_schema("set_columns", schema)?;
        self.write_header_row(self.active_sheet(), schema)?;
        self.schema = Some(schema.clone());
        Ok(())
    }

    /// Write the header row to every sheet currently in the workbook
    ///
    /// Sheets added afterwards do not inherit the headers.
    pub fn set_columns_all_sheets(&mut self, schema: &ColumnSchema) -> Result<()> {
        self.validate_schema("set_columns_all_sheets", schema)?;
        for index in 0..self.states.len() {
            self.write_header_row(index, schema)?;
        }
        self.schema = Some(schema.clone());
        Ok(())
    }

    fn validate_schema(&self, operation: &'static str, schema: &ColumnSchema) -> Result<()> {
        if schema.is_empty() {
            return Err(ExportError::EmptyArgument {
                operation,
                argument: "schema",
            });
        }
        if schema.len() > self.engine.max_columns() as usize {
            return Err(ExportError::ColumnCountExceeded {
                count: schema.len(),
                max: self.engine.max_columns(),
            });
        }
        Ok(())
    }

    fn write_header_row(&mut self, index: usize, schema: &ColumnSchema) -> Result<()> {
        let count = self.engine.sheet_count();
        let sheet = self
            .engine
            .sheet_mut(index)
            .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
        for (c, column) in schema.iter().enumerate() {
            sheet.set_cell(1, (c + 1) as u16, CellValue::String(column.header.clone()))?;
        }
        let state = &mut self.states[index];
        state.has_header = true;
        state.row_cursor = state.row_cursor.max(state.first_data_row());
        trace!("header row written to sheet {}", index);
        Ok(())
    }

    // === Totals ===

    /// Write one summary value per column into row 2 of the active sheet
    ///
    /// Must be called before any data is appended to the active sheet; the
    /// first data row shifts down to row 3.
    pub fn set_totals(&mut self, values: &[CellValue]) -> Result<()> {
        if values.is_empty() {
            return Err(ExportError::EmptyArgument {
                operation: "set_totals",
                argument: "values",
            });
        }
        let index = self.active_sheet();
        if self.states[index].data_written {
            return Err(ExportError::TotalsAfterData);
        }
        let count = self.engine.sheet_count();
        let sheet = self
            .engine
            .sheet_mut(index)
            .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
        for (c, value) in values.iter().enumerate() {
            sheet.set_cell(2, (c + 1) as u16, value.clone())?;
        }
        let state = &mut self.states[index];
        state.has_totals = true;
        state.row_cursor = state.row_cursor.max(state.first_data_row());
        Ok(())
    }

    // === Bulk data ===

    /// Append rows, spilling into new sheets as the row limit is reached
    ///
    /// Rows are written in order; each row is resolved against `schema` (a
    /// schema field missing from a record is an error, raised before any of
    /// that row's cells are written). The cancellation token is checked
    /// before each row; on cancellation, rows already written stay in place.
    pub fn add_data(
        &mut self,
        rows: &[RowRecord],
        schema: &ColumnSchema,
        cancel: &CancelToken,
    ) -> Result<()> {
        if rows.is_empty() {
            return Err(ExportError::EmptyArgument {
                operation: "add_data",
                argument: "rows",
            });
        }
        self.validate_schema("add_data", schema)?;

        // A spill sheet must fit its header plus at least one data row,
        // otherwise pagination cannot make progress.
        let spill_first_data_row: u32 = if self.schema.is_some() { 2 } else { 1 };
        if self.max_rows_per_sheet < spill_first_data_row {
            return Err(ExportError::InvalidRowLimit {
                requested: self.max_rows_per_sheet,
                max: self.engine.max_rows(),
            });
        }

        let spill_schema = self.schema.clone();

        for (i, row) in rows.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!("cancellation observed after {} row(s)", i);
                return Err(ExportError::Cancelled { rows_written: i });
            }

            // Resolve the whole row before touching the sheet, so a bad row
            // never leaves a half-written line or an empty spill sheet.
            for column in schema.iter() {
                if !row.contains(&column.field) {
                    return Err(ExportError::MissingField {
                        row: i + 1,
                        field: column.field.clone(),
                    });
                }
            }

            let mut index = self.active_sheet();
            if self.states[index].row_cursor > self.max_rows_per_sheet {
                index = self.engine.add_sheet();
                self.states.push(SheetState::new());
                debug!("row limit reached, spilling to sheet {}", index);
                if let Some(ref header_schema) = spill_schema {
                    self.write_header_row(index, header_schema)?;
                }
            }

            let cursor = self.states[index].row_cursor;
            let count = self.engine.sheet_count();
            let sheet = self
                .engine
                .sheet_mut(index)
                .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
            for (c, column) in schema.iter().enumerate() {
                let raw = row.get(&column.field).cloned().unwrap_or(CellValue::Empty);
                sheet.set_cell(cursor, (c + 1) as u16, column.kind.coerce(raw))?;
            }

            let state = &mut self.states[index];
            state.row_cursor = cursor + 1;
            state.data_written = true;
        }

        trace!("appended {} row(s)", rows.len());
        Ok(())
    }

    // === Column styles ===

    /// Apply style rules to header cells of the active sheet
    pub fn set_column_styles(&mut self, rules: &[StyleRule]) -> Result<()> {
        if rules.is_empty() {
            return Err(ExportError::EmptyArgument {
                operation: "set_column_styles",
                argument: "rules",
            });
        }
        self.apply_column_rules(self.active_sheet(), rules)
    }

    /// Apply style rules to header cells of every sheet
    ///
    /// Name-based rules are resolved against each sheet's own header row, so
    /// sheets whose headers were written at different times resolve
    /// independently.
    pub fn set_column_styles_all_sheets(&mut self, rules: &[StyleRule]) -> Result<()> {
        if rules.is_empty() {
            return Err(ExportError::EmptyArgument {
                operation: "set_column_styles_all_sheets",
                argument: "rules",
            });
        }
        for index in 0..self.states.len() {
            self.apply_column_rules(index, rules)?;
        }
        Ok(())
    }

    fn apply_column_rules(&mut self, index: usize, rules: &[StyleRule]) -> Result<()> {
        for rule in rules {
            let col = match &rule.column {
                ColumnRef::Index(i) => *i,
                ColumnRef::Name(name) => self.resolve_column_by_name(index, name)?,
            };
            let count = self.engine.sheet_count();
            let sheet = self
                .engine
                .sheet_mut(index)
                .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
            sheet.apply_style(1, col, &rule.patch)?;
        }
        Ok(())
    }

    /// Scan a sheet's header row for an exact, case-sensitive text match
    ///
    /// Header rows are written contiguously from column 1, so the scan stops
    /// at the first gap.
    fn resolve_column_by_name(&self, index: usize, name: &str) -> Result<u16> {
        let sheet = self
            .engine
            .sheet(index)
            .ok_or_else(|| spillway_core::Error::SheetOutOfBounds(index, self.engine.sheet_count()))?;
        let mut col: u16 = 1;
        while let Some(value) = sheet.cell_value(1, col) {
            if value.as_str() == Some(name) {
                return Ok(col);
            }
            if col == self.engine.max_columns() {
                break;
            }
            col += 1;
        }
        Err(ExportError::ColumnNotFound {
            name: name.to_string(),
        })
    }

    // === Range styles ===

    /// Apply a style patch to a rectangle of the active sheet
    ///
    /// Coordinates are 1-based inclusive. All four are validated together:
    /// the error lists every offending parameter, not just the first.
    pub fn set_range_style(
        &mut self,
        row: u32,
        column: u16,
        last_row: u32,
        last_column: u16,
        patch: &StylePatch,
    ) -> Result<()> {
        validate_range(row, column, last_row, last_column)?;
        self.apply_range_style(self.active_sheet(), row, column, last_row, last_column, patch)
    }

    /// Apply a style patch to the same rectangle of every sheet
    pub fn set_range_style_all_sheets(
        &mut self,
        row: u32,
        column: u16,
        last_row: u32,
        last_column: u16,
        patch: &StylePatch,
    ) -> Result<()> {
        validate_range(row, column, last_row, last_column)?;
        for index in 0..self.states.len() {
            self.apply_range_style(index, row, column, last_row, last_column, patch)?;
        }
        Ok(())
    }

    fn apply_range_style(
        &mut self,
        index: usize,
        row: u32,
        column: u16,
        last_row: u32,
        last_column: u16,
        patch: &StylePatch,
    ) -> Result<()> {
        let count = self.engine.sheet_count();
        let sheet = self
            .engine
            .sheet_mut(index)
            .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
        for r in row..=last_row {
            for c in column..=last_column {
                sheet.apply_style(r, c, patch)?;
            }
        }
        Ok(())
    }

    // === Column widths ===

    /// Set the width of a named column on the active sheet, in pixels
    pub fn set_column_width_px(&mut self, name: &str, width_px: u32) -> Result<()> {
        let index = self.active_sheet();
        self.apply_column_width(index, name, width_px)
    }

    /// Set the width of a named column on every sheet, in pixels
    pub fn set_column_width_px_all_sheets(&mut self, name: &str, width_px: u32) -> Result<()> {
        for index in 0..self.states.len() {
            self.apply_column_width(index, name, width_px)?;
        }
        Ok(())
    }

    fn apply_column_width(&mut self, index: usize, name: &str, width_px: u32) -> Result<()> {
        let col = self.resolve_column_by_name(index, name)?;
        let count = self.engine.sheet_count();
        let sheet = self
            .engine
            .sheet_mut(index)
            .ok_or(spillway_core::Error::SheetOutOfBounds(index, count))?;
        sheet.set_column_width_px(col, width_px)?;
        Ok(())
    }
}

fn validate_range(row: u32, column: u16, last_row: u32, last_column: u16) -> Result<()> {
    let mut invalid = Vec::new();
    if row < 1 {
        invalid.push("row");
    }
    if column < 1 {
        invalid.push("column");
    }
    if last_row < 1 {
        invalid.push("last_row");
    }
    if last_column < 1 {
        invalid.push("last_column");
    }
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ExportError::RangeOutOfBounds {
            arguments: invalid.join(", "),
        })
    }
}
