//! End-to-end styling tests: sparse column rules, range styles, totals
//! offsets and column widths

use pretty_assertions::assert_eq;
use spillway::prelude::*;

fn inventory_schema() -> ColumnSchema {
    ColumnSchema::new()
        .with_column(ColumnDefinition::text("sku", "SKU"))
        .with_column(ColumnDefinition::number("qty", "Quantity"))
        .with_column(ColumnDefinition::number("price", "Price"))
}

fn inventory_rows(n: usize) -> Vec<RowRecord> {
    (0..n)
        .map(|i| {
            RowRecord::new()
                .with("sku", format!("SKU-{}", i))
                .with("qty", i as i64)
                .with("price", i as f64 * 1.5)
        })
        .collect()
}

#[test]
fn test_sparse_patches_stack() {
    let mut wb = ExportWorkbook::new();
    wb.set_columns(&inventory_schema()).unwrap();

    // Bold first, color second; the second patch must not reset the first
    wb.set_column_styles(&[StyleRule::by_index(1, StylePatch::new().bold(true))])
        .unwrap();
    wb.set_column_styles(&[StyleRule::by_index(
        1,
        StylePatch::new().font_color(Color::RED),
    )])
    .unwrap();

    let style = wb.engine().sheet(0).unwrap().cell_style(1, 1);
    assert!(style.font.bold);
    assert_eq!(style.font.color, Color::RED);
}

#[test]
fn test_rules_by_name_and_index() {
    let mut wb = ExportWorkbook::new();
    wb.set_columns(&inventory_schema()).unwrap();

    wb.set_column_styles(&[
        StyleRule::by_name("Quantity", StylePatch::new().bold(true)),
        StyleRule::by_index(3, StylePatch::new().italic(true)),
    ])
    .unwrap();

    let sheet = wb.engine().sheet(0).unwrap();
    assert!(sheet.cell_style(1, 2).font.bold);
    assert!(sheet.cell_style(1, 3).font.italic);
    assert!(!sheet.cell_style(1, 1).font.bold);
}

#[test]
fn test_name_matching_is_exact_and_case_sensitive() {
    let mut wb = ExportWorkbook::new();
    wb.set_columns(&inventory_schema()).unwrap();

    let err = wb
        .set_column_styles(&[StyleRule::by_name(
            "quantity",
            StylePatch::new().bold(true),
        )])
        .unwrap_err();
    match err {
        ExportError::ColumnNotFound { name } => assert_eq!(name, "quantity"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_all_sheets_rules_resolve_per_sheet() {
    let schema = inventory_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(5).unwrap();
    wb.set_columns(&schema).unwrap();
    // 10 rows at 4 data rows per sheet spills to a third sheet
    wb.add_data(&inventory_rows(10), &schema, &CancelToken::new())
        .unwrap();
    assert_eq!(wb.sheet_count(), 3);

    wb.set_column_styles_all_sheets(&[StyleRule::by_name(
        "Price",
        StylePatch::new().fill_color(Color::rgb(255, 255, 0)),
    )])
    .unwrap();

    for i in 0..3 {
        let style = wb.engine().sheet(i).unwrap().cell_style(1, 3);
        assert_eq!(style.fill, FillStyle::Solid { color: Color::rgb(255, 255, 0) });
    }
}

#[test]
fn test_single_sheet_rules_touch_only_active_sheet() {
    let mut wb = ExportWorkbook::new();
    wb.add_sheet();
    wb.set_columns_all_sheets(&inventory_schema()).unwrap();

    wb.set_column_styles(&[StyleRule::by_index(1, StylePatch::new().bold(true))])
        .unwrap();

    // Only the active (last) sheet was styled
    assert!(!wb.engine().sheet(0).unwrap().cell_style(1, 1).font.bold);
    assert!(wb.engine().sheet(1).unwrap().cell_style(1, 1).font.bold);
}

#[test]
fn test_totals_shift_data_to_row_three() {
    let schema = inventory_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_columns(&schema).unwrap();
    wb.set_totals(&[
        CellValue::from("Total"),
        CellValue::from(45.0),
        CellValue::from(67.5),
    ])
    .unwrap();
    wb.add_data(&inventory_rows(2), &schema, &CancelToken::new())
        .unwrap();

    let sheet = wb.engine().sheet(0).unwrap();
    assert_eq!(sheet.cell_value(1, 1).unwrap().as_str(), Some("SKU"));
    assert_eq!(sheet.cell_value(2, 1).unwrap().as_str(), Some("Total"));
    assert_eq!(sheet.cell_value(2, 2).unwrap().as_number(), Some(45.0));
    assert_eq!(sheet.cell_value(3, 1).unwrap().as_str(), Some("SKU-0"));
    assert_eq!(sheet.cell_value(4, 1).unwrap().as_str(), Some("SKU-1"));
}

#[test]
fn test_range_style_covers_rectangle() {
    let schema = inventory_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_columns(&schema).unwrap();
    wb.add_data(&inventory_rows(3), &schema, &CancelToken::new())
        .unwrap();

    wb.set_range_style(2, 1, 3, 2, &StylePatch::new().italic(true))
        .unwrap();

    let sheet = wb.engine().sheet(0).unwrap();
    assert!(sheet.cell_style(2, 1).font.italic);
    assert!(sheet.cell_style(3, 2).font.italic);
    assert!(!sheet.cell_style(1, 1).font.italic);
    assert!(!sheet.cell_style(4, 1).font.italic);
    assert!(!sheet.cell_style(2, 3).font.italic);
}

#[test]
fn test_range_style_all_sheets() {
    let mut wb = ExportWorkbook::new();
    wb.add_sheet();
    wb.set_range_style_all_sheets(1, 1, 1, 2, &StylePatch::new().bold(true))
        .unwrap();

    for i in 0..2 {
        let sheet = wb.engine().sheet(i).unwrap();
        assert!(sheet.cell_style(1, 1).font.bold);
        assert!(sheet.cell_style(1, 2).font.bold);
        // Styling an empty cell materializes it as style-only
        assert_eq!(sheet.cell_value(1, 1), Some(&CellValue::Empty));
    }
}

#[test]
fn test_column_width_all_sheets_resolves_each_header() {
    let schema = inventory_schema();
    let mut wb = ExportWorkbook::new();
    wb.set_max_rows_per_sheet(5).unwrap();
    wb.set_columns(&schema).unwrap();
    wb.add_data(&inventory_rows(10), &schema, &CancelToken::new())
        .unwrap();
    assert_eq!(wb.sheet_count(), 3);

    wb.set_column_width_px_all_sheets("SKU", 140).unwrap();

    for i in 0..3 {
        assert_eq!(wb.engine().sheet(i).unwrap().column_width_px(1), Some(140));
    }
}
