//! XLSX writer

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use log::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{escape_xml, XlsxStyleTable};
use spillway_core::{CellValue, GridWorkbook};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &GridWorkbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to an in-memory byte buffer
    pub fn write_bytes(workbook: &GridWorkbook) -> XlsxResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write(workbook, Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &GridWorkbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for i in 0..workbook.sheet_count() {
            Self::write_worksheet(&mut zip, workbook, i, &style_table)?;
        }

        zip.finish()?;
        debug!("wrote workbook with {} sheet(s)", workbook.sheet_count());
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &GridWorkbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &GridWorkbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.sheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str("\n    </sheets>\n</workbook>");
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &GridWorkbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(style_table.to_styles_xml().as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &GridWorkbook,
        index: usize,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let sheet = workbook
            .sheet(index)
            .ok_or_else(|| XlsxError::InvalidStructure(format!("sheet {} not found", index)))?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        // Custom column widths
        let cols: Vec<(u16, u32)> = sheet.column_widths_px().collect();
        if !cols.is_empty() {
            content.push_str("\n    <cols>");
            for (col, px) in cols {
                content.push_str(&format!(
                    "\n        <col min=\"{}\" max=\"{}\" width=\"{:.4}\" customWidth=\"1\"/>",
                    col,
                    col,
                    pixels_to_width_chars(px)
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");

        // Cell data, sparse, row-major
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row));
                current_row = Some(row);
            }

            let cell_ref = format!("{}{}", column_letters(col), row);
            let is_date = matches!(cell.value, CellValue::DateTime(_));
            let xf_id = style_table.xf_id_for(index, cell.style_index, is_date);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };

            match &cell.value {
                CellValue::Number(n) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref, style_attr, n
                    ));
                }
                CellValue::String(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t>{}</t></is></c>",
                        cell_ref,
                        style_attr,
                        escape_xml(s)
                    ));
                }
                CellValue::Boolean(b) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        if *b { 1 } else { 0 }
                    ));
                }
                CellValue::DateTime(dt) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        datetime_to_serial(dt)
                    ));
                }
                CellValue::Empty => {
                    // Preserve style-only cells
                    if xf_id != 0 {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{} />",
                            cell_ref, style_attr
                        ));
                    }
                }
            }
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");
        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Convert a 1-based column index to A1 letters (1 -> A, 27 -> AA)
pub(crate) fn column_letters(col: u16) -> String {
    let mut n = col as u32;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert pixels to the character-based width unit of the `<col>` element
fn pixels_to_width_chars(px: u32) -> f64 {
    // Standard conversion for the default Calibri 11 font (7px per character
    // plus 5px padding)
    ((px as f64) - 5.0).max(0.0) / 7.0
}

/// Convert a date/time to an Excel serial number (1900 date system)
fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    // Excel day 0 is 1899-12-30 in the 1900 system (accounting for the
    // fictional 1900-02-29)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    let days = dt.date().signed_duration_since(base).num_days() as f64;
    let secs = dt.time().num_seconds_from_midnight() as f64;
    days + secs / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_datetime_serial() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(datetime_to_serial(&dt), 45292.0);

        let noon = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(datetime_to_serial(&noon).fract(), 0.5);
    }

    #[test]
    fn test_pixel_width_conversion() {
        assert!((pixels_to_width_chars(64) - 8.4286).abs() < 0.001);
        assert_eq!(pixels_to_width_chars(3), 0.0);
    }
}
