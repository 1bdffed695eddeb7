//! XLSX styles (styles.xml) write helpers

use std::collections::HashMap;

use spillway_core::style::{
    BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle, HorizontalAlignment, Style,
    VerticalAlignment,
};
use spillway_core::{CellValue, GridWorkbook};

/// Built-in number format for date/time cells (m/d/yy h:mm)
const DATETIME_NUM_FMT_ID: u32 = 22;

/// Workbook-wide deduplicated style table
///
/// Sheets keep their own style pools; the file format wants one global
/// `cellXfs` table. Date/time cells need a number format on top of whatever
/// style the cell carries, so each style can have a "date twin" xf.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Global styles with a date-format flag. Index = cellXfs xf id.
    xfs: Vec<(Style, bool)>,
    /// Per-sheet mapping: (local style index, is_date) -> global xf id
    sheet_maps: Vec<HashMap<(u32, bool), u32>>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &GridWorkbook) -> Self {
        let mut xfs: Vec<(Style, bool)> = Vec::new();
        let mut xf_lookup: HashMap<(Style, bool), u32> = HashMap::new();

        // xf 0 is always the default style
        xfs.push((Style::default(), false));
        xf_lookup.insert((Style::default(), false), 0);

        let mut sheet_maps = Vec::with_capacity(workbook.sheet_count());

        for sheet in workbook.sheets() {
            let mut map: HashMap<(u32, bool), u32> = HashMap::new();
            map.insert((0, false), 0);

            for (_row, _col, cell) in sheet.iter_cells() {
                let is_date = matches!(cell.value, CellValue::DateTime(_));
                let key = (cell.style_index, is_date);
                if map.contains_key(&key) {
                    continue;
                }

                let style = sheet
                    .style_pool()
                    .get(cell.style_index)
                    .cloned()
                    .unwrap_or_default();

                let global_key = (style.clone(), is_date);
                let xf_id = match xf_lookup.get(&global_key) {
                    Some(&id) => id,
                    None => {
                        let id = xfs.len() as u32;
                        xfs.push((style, is_date));
                        xf_lookup.insert(global_key, id);
                        id
                    }
                };

                map.insert(key, xf_id);
            }

            sheet_maps.push(map);
        }

        Self { xfs, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32, is_date: bool) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&(local_style_index, is_date)).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        // Component tables
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();
        fonts.push(FontStyle::default());
        font_ids.insert(FontStyle::default(), 0);

        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        let mut fills: Vec<FillStyle> = Vec::new();
        // Excel requires the first two fills to be none and gray125
        fills.push(FillStyle::None);
        fills.push(FillStyle::None); // placeholder, written as gray125 below
        fill_ids.insert(FillStyle::None, 0);

        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        let mut borders: Vec<BorderStyle> = Vec::new();
        borders.push(BorderStyle::default());
        border_ids.insert(BorderStyle::default(), 0);

        struct ResolvedXf {
            font_id: u32,
            fill_id: u32,
            border_id: u32,
            num_fmt_id: u32,
        }

        let mut resolved: Vec<ResolvedXf> = Vec::with_capacity(self.xfs.len());
        for (style, is_date) in &self.xfs {
            let font_id = match font_ids.get(&style.font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(style.font.clone());
                    font_ids.insert(style.font.clone(), id);
                    id
                }
            };

            let fill_id = match style.fill {
                FillStyle::None => 0,
                other => {
                    if let Some(&id) = fill_ids.get(&other) {
                        id
                    } else {
                        let id = fills.len() as u32;
                        fills.push(other);
                        fill_ids.insert(other, id);
                        id
                    }
                }
            };

            let border_id = match border_ids.get(&style.border) {
                Some(&id) => id,
                None => {
                    let id = borders.len() as u32;
                    borders.push(style.border);
                    border_ids.insert(style.border, id);
                    id
                }
            };

            resolved.push(ResolvedXf {
                font_id,
                fill_id,
                border_id,
                num_fmt_id: if *is_date { DATETIME_NUM_FMT_ID } else { 0 },
            });
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        // Fonts
        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        // Fills
        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for fill in fills.iter().skip(2) {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        // Borders
        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        // cellStyleXfs (required)
        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        // cellXfs
        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.xfs.len()));
        for (i, ids) in resolved.iter().enumerate() {
            let (style, _) = &self.xfs[i];
            let mut attrs = format!(
                "numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\"",
                ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id
            );
            if ids.num_fmt_id != 0 {
                attrs.push_str(" applyNumberFormat=\"1\"");
            }
            if ids.font_id != 0 {
                attrs.push_str(" applyFont=\"1\"");
            }
            if ids.fill_id != 0 {
                attrs.push_str(" applyFill=\"1\"");
            }
            if ids.border_id != 0 {
                attrs.push_str(" applyBorder=\"1\"");
            }

            let alignment = write_alignment(style);
            if alignment.is_empty() {
                xml.push_str(&format!("\n    <xf {}/>", attrs));
            } else {
                xml.push_str(&format!(
                    "\n    <xf {} applyAlignment=\"1\">{}</xf>",
                    attrs, alignment
                ));
            }
        }
        xml.push_str("\n  </cellXfs>");

        // cellStyles (required)
        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
</styleSheet>"#,
        );

        xml
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut parts = String::new();
    if font.bold {
        parts.push_str("<b/>");
    }
    if font.italic {
        parts.push_str("<i/>");
    }
    parts.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if font.color != Color::Auto {
        parts.push_str(&format!("<color rgb=\"{}\"/>", font.color.to_argb_hex()));
    }
    parts.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    format!("<font>{}</font>", parts)
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/></patternFill></fill>",
            color.to_argb_hex()
        ),
    }
}

fn write_border(border: &BorderStyle) -> String {
    let line = match border.outline {
        BorderLineStyle::None => None,
        BorderLineStyle::Thin => Some("thin"),
        BorderLineStyle::Medium => Some("medium"),
        BorderLineStyle::Thick => Some("thick"),
    };
    match line {
        None => {
            "<border><left/><right/><top/><bottom/><diagonal/></border>".to_string()
        }
        Some(style) => format!(
            "<border><left style=\"{s}\"/><right style=\"{s}\"/><top style=\"{s}\"/><bottom style=\"{s}\"/><diagonal/></border>",
            s = style
        ),
    }
}

fn write_alignment(style: &Style) -> String {
    let mut attrs = String::new();
    match style.alignment.horizontal {
        HorizontalAlignment::General => {}
        HorizontalAlignment::Left => attrs.push_str(" horizontal=\"left\""),
        HorizontalAlignment::Center => attrs.push_str(" horizontal=\"center\""),
        HorizontalAlignment::Right => attrs.push_str(" horizontal=\"right\""),
    }
    match style.alignment.vertical {
        VerticalAlignment::Bottom => {}
        VerticalAlignment::Top => attrs.push_str(" vertical=\"top\""),
        VerticalAlignment::Center => attrs.push_str(" vertical=\"center\""),
    }
    if attrs.is_empty() {
        String::new()
    } else {
        format!("<alignment{}/>", attrs)
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
