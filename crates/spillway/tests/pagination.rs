//! End-to-end pagination tests: row limits, spill sheets, header
//! propagation and cooperative cancellation

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use spillway::prelude::*;
use spillway::{EngineSheet, SpreadsheetEngine};
use spillway_core::{GridSheet, GridWorkbook, MAX_COLS, MAX_ROWS};

fn order_schema() -> ColumnSchema {
    ColumnSchema::new()
        .with_column(ColumnDefinition::text("id", "ID"))
        .with_column(ColumnDefinition::number("amount", "Amount"))
}

fn order_rows(n: usize) -> Vec<RowRecord> {
    (0..n)
        .map(|i| {
            RowRecord::new()
                .with("id", format!("r{}", i))
                .with("amount", i as f64)
        })
        .collect()
}

#[test]
fn test_spill_without_headers() {
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(10).unwrap();
    wb.add_data(&order_rows(30), &order_schema(), &CancelToken::new())
        .unwrap();

    // 30 rows at 10 per sheet fill three sheets exactly
    assert_eq!(wb.sheet_count(), 3);
    for i in 0..3 {
        let sheet = wb.engine().sheet(i).unwrap();
        assert_eq!(sheet.cell_count(), 20, "sheet {} should hold 10 full rows", i);
        assert!(sheet.cell_value(11, 1).is_none());
    }

    // Order is preserved across the spill boundaries
    let first = wb.engine().sheet(0).unwrap();
    assert_eq!(first.cell_value(1, 1).unwrap().as_str(), Some("r0"));
    assert_eq!(first.cell_value(10, 1).unwrap().as_str(), Some("r9"));
    let second = wb.engine().sheet(1).unwrap();
    assert_eq!(second.cell_value(1, 1).unwrap().as_str(), Some("r10"));
    let third = wb.engine().sheet(2).unwrap();
    assert_eq!(third.cell_value(10, 1).unwrap().as_str(), Some("r29"));
    assert_eq!(third.cell_value(10, 2).unwrap().as_number(), Some(29.0));
}

#[test]
fn test_spill_with_headers() {
    let schema = order_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(10).unwrap();
    wb.set_columns(&schema).unwrap();
    wb.add_data(&order_rows(30), &schema, &CancelToken::new())
        .unwrap();

    // The header occupies row 1 of every sheet, leaving 9 data rows each:
    // 9 + 9 + 9 + 3 = 30
    assert_eq!(wb.sheet_count(), 4);

    for i in 0..4 {
        let sheet = wb.engine().sheet(i).unwrap();
        assert_eq!(sheet.cell_value(1, 1).unwrap().as_str(), Some("ID"));
        assert_eq!(sheet.cell_value(1, 2).unwrap().as_str(), Some("Amount"));
    }

    let first = wb.engine().sheet(0).unwrap();
    assert_eq!(first.cell_value(2, 1).unwrap().as_str(), Some("r0"));
    assert_eq!(first.cell_value(10, 1).unwrap().as_str(), Some("r8"));
    assert!(first.cell_value(11, 1).is_none());

    let second = wb.engine().sheet(1).unwrap();
    assert_eq!(second.cell_value(2, 1).unwrap().as_str(), Some("r9"));

    let last = wb.engine().sheet(3).unwrap();
    assert_eq!(last.cell_value(2, 1).unwrap().as_str(), Some("r27"));
    assert_eq!(last.cell_value(4, 1).unwrap().as_str(), Some("r29"));
    assert!(last.cell_value(5, 1).is_none());
}

#[test]
fn test_multiple_appends_continue_where_they_left_off() {
    let schema = order_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(10).unwrap();

    let rows = order_rows(30);
    wb.add_data(&rows[..7], &schema, &CancelToken::new()).unwrap();
    assert_eq!(wb.sheet_count(), 1);
    wb.add_data(&rows[7..], &schema, &CancelToken::new()).unwrap();

    assert_eq!(wb.sheet_count(), 3);
    let first = wb.engine().sheet(0).unwrap();
    assert_eq!(first.cell_value(8, 1).unwrap().as_str(), Some("r7"));
    assert_eq!(first.cell_value(10, 1).unwrap().as_str(), Some("r9"));
}

#[test]
fn test_spill_sheets_get_generated_names() {
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(10).unwrap();
    wb.add_data(&order_rows(25), &order_schema(), &CancelToken::new())
        .unwrap();

    let names: Vec<&str> = wb.engine().sheets().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Sheet1", "Sheet2", "Sheet3"]);
}

#[test]
fn test_header_propagation_excludes_later_sheets() {
    let schema = order_schema();
    let mut wb = ExportWorkbook::new();
    wb.add_sheet();
    wb.set_columns_all_sheets(&schema).unwrap();

    // Both existing sheets got headers
    for i in 0..2 {
        let sheet = wb.engine().sheet(i).unwrap();
        assert_eq!(sheet.cell_value(1, 1).unwrap().as_str(), Some("ID"));
    }

    // A sheet added afterwards does not inherit them
    let index = wb.add_sheet();
    assert!(wb.engine().sheet(index).unwrap().is_empty());
}

#[test]
fn test_limit_too_small_for_header_and_data() {
    let schema = order_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(1).unwrap();
    wb.set_columns(&schema).unwrap();

    // A spill sheet would hold the header and nothing else
    let err = wb
        .add_data(&order_rows(2), &schema, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, ExportError::InvalidRowLimit { requested: 1, .. }));
}

// === Cancellation ===

/// A grid-backed engine whose sheets flip a [`CancelToken`] after a fixed
/// number of cell writes, simulating a caller cancelling mid-append.
struct TripwireEngine {
    sheets: Vec<TripwireSheet>,
    token: CancelToken,
    writes_left: Arc<AtomicU32>,
}

struct TripwireSheet {
    inner: GridSheet,
    token: CancelToken,
    writes_left: Arc<AtomicU32>,
}

impl TripwireEngine {
    fn new(token: CancelToken, cancel_after_writes: u32) -> Self {
        let writes_left = Arc::new(AtomicU32::new(cancel_after_writes));
        let sheets = vec![TripwireSheet {
            inner: GridSheet::new("Sheet1"),
            token: token.clone(),
            writes_left: writes_left.clone(),
        }];
        Self {
            sheets,
            token,
            writes_left,
        }
    }
}

impl SpreadsheetEngine for TripwireEngine {
    type Sheet = TripwireSheet;

    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn add_sheet(&mut self) -> usize {
        self.sheets.push(TripwireSheet {
            inner: GridSheet::new(format!("Sheet{}", self.sheets.len() + 1)),
            token: self.token.clone(),
            writes_left: self.writes_left.clone(),
        });
        self.sheets.len() - 1
    }

    fn sheet(&self, index: usize) -> Option<&TripwireSheet> {
        self.sheets.get(index)
    }

    fn sheet_mut(&mut self, index: usize) -> Option<&mut TripwireSheet> {
        self.sheets.get_mut(index)
    }

    fn max_rows(&self) -> u32 {
        MAX_ROWS
    }

    fn max_columns(&self) -> u16 {
        MAX_COLS
    }
}

impl EngineSheet for TripwireSheet {
    fn set_cell(
        &mut self,
        row: u32,
        col: u16,
        value: CellValue,
    ) -> std::result::Result<(), spillway_core::Error> {
        self.inner.set_cell(row, col, value)?;
        let left = self.writes_left.load(Ordering::Relaxed);
        if left > 0 {
            self.writes_left.store(left - 1, Ordering::Relaxed);
            if left == 1 {
                self.token.cancel();
            }
        }
        Ok(())
    }

    fn cell_value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.inner.cell_value(row, col)
    }

    fn apply_style(
        &mut self,
        row: u32,
        col: u16,
        patch: &StylePatch,
    ) -> std::result::Result<(), spillway_core::Error> {
        self.inner.apply_style(row, col, patch)
    }

    fn set_column_width_px(
        &mut self,
        col: u16,
        width_px: u32,
    ) -> std::result::Result<(), spillway_core::Error> {
        self.inner.set_column_width_px(col, width_px)
    }
}

#[test]
fn test_cancellation_keeps_completed_rows() {
    let schema = order_schema();
    let token = CancelToken::new();

    // Two cells per row: cancel once row 5 has been fully written
    let engine = TripwireEngine::new(token.clone(), 10);
    let mut wb = ExportWorkbook::with_engine(engine);

    let err = wb
        .add_data(&order_rows(20_000), &schema, &token)
        .unwrap_err();
    match err {
        ExportError::Cancelled { rows_written } => assert_eq!(rows_written, 5),
        other => panic!("unexpected error: {other:?}"),
    }

    // Exactly rows 1 through 5 survive
    let sheet = wb.engine().sheet(0).unwrap();
    assert_eq!(sheet.inner.cell_count(), 10);
    assert_eq!(sheet.cell_value(5, 1).unwrap().as_str(), Some("r4"));
    assert!(sheet.cell_value(6, 1).is_none());
}

#[test]
fn test_pre_cancelled_token_writes_nothing() {
    let token = CancelToken::new();
    token.cancel();

    let mut wb = ExportWorkbook::new();
    let err = wb
        .add_data(&order_rows(3), &order_schema(), &token)
        .unwrap_err();
    assert!(matches!(err, ExportError::Cancelled { rows_written: 0 }));
    assert!(wb.engine().sheet(0).unwrap().is_empty());
}

/// The Excel engine caps sheets at 1,048,576 rows even when no explicit
/// limit is configured.
#[test]
fn test_default_limit_is_engine_max() {
    let wb: ExportWorkbook<GridWorkbook> = ExportWorkbook::new();
    assert_eq!(wb.max_rows_per_sheet(), MAX_ROWS);
}
