//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`Style`] - Complete, resolved cell style
//! - [`StylePatch`] - Sparse patch of style attributes
//! - [`FontStyle`], [`FillStyle`], [`Alignment`], [`BorderStyle`] - Components
//! - [`Color`] - Color representation

mod pool;

pub use pool::StylePool;

use std::fmt;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`]; cells reference styles by
/// index. Use [`StylePatch`] to change individual attributes without
/// disturbing the rest.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Text alignment
    pub alignment: Alignment,
    /// Border settings
    pub border: BorderStyle,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::Solid { color };
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Set outline border
    pub fn border(mut self, line: BorderLineStyle) -> Self {
        self.border.outline = line;
        self
    }

    /// Apply a sparse patch, overwriting only the attributes the patch sets
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(bold) = patch.bold {
            self.font.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.font.italic = italic;
        }
        if let Some(color) = patch.font_color {
            self.font.color = color;
        }
        if let Some(fill) = patch.fill {
            self.fill = fill;
        }
        if let Some(horizontal) = patch.horizontal {
            self.alignment.horizontal = horizontal;
        }
        if let Some(outline) = patch.border {
            self.border.outline = outline;
        }
    }
}

impl std::hash::Hash for Style {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.fill.hash(state);
        self.alignment.hash(state);
        self.border.hash(state);
    }
}

impl Eq for Style {}

/// Sparse patch of style attributes
///
/// Every attribute is optional; unset attributes leave the target cell's
/// current value untouched. A patch is never a full replace.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePatch {
    /// Bold on/off
    pub bold: Option<bool>,
    /// Italic on/off
    pub italic: Option<bool>,
    /// Font color
    pub font_color: Option<Color>,
    /// Background fill
    pub fill: Option<FillStyle>,
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Outline border
    pub border: Option<BorderLineStyle>,
}

impl StylePatch {
    /// Create an empty patch (applies nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Set a solid background fill
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(FillStyle::Solid { color });
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set outline border
    pub fn border(mut self, line: BorderLineStyle) -> Self {
        self.border = Some(line);
        self
    }

    /// Check whether the patch sets anything at all
    pub fn is_empty(&self) -> bool {
        self.bold.is_none()
            && self.italic.is_none()
            && self.font_color.is_none()
            && self.fill.is_none()
            && self.horizontal.is_none()
            && self.border.is_none()
    }
}

/// Font style settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: String,
    /// Font size in points
    pub size: f64,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Font color
    pub color: Color,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            color: Color::Auto,
        }
    }
}

impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}

/// Background fill settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillStyle {
    /// No fill
    #[default]
    None,
    /// Solid color fill
    Solid {
        /// Fill color
        color: Color,
    },
}

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment
    pub vertical: VerticalAlignment,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// General (type-dependent)
    #[default]
    General,
    /// Left-aligned
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    /// Top-aligned
    Top,
    /// Centered
    Center,
    /// Bottom-aligned
    #[default]
    Bottom,
}

/// Cell border settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    /// Outline line style, applied to all four edges
    pub outline: BorderLineStyle,
}

/// Border line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,
    /// RGB color (no alpha)
    Rgb {
        /// Red channel
        r: u8,
        /// Green channel
        g: u8,
        /// Blue channel
        b: u8,
    },
}

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Red
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb { r, g, b })
    }

    /// Convert to ARGB hex string (8 characters, used by XLSX)
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Auto => "FF000000".to_string(),
            Color::Rgb { r, g, b } => format!("FF{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_argb_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_is_sparse() {
        let mut style = Style::new().font_color(Color::RED);

        style.apply(&StylePatch::new().bold(true));

        assert!(style.font.bold);
        // A patch that only sets bold must not touch the color
        assert_eq!(style.font.color, Color::RED);
    }

    #[test]
    fn test_patch_overwrites_set_attributes() {
        let mut style = Style::new().bold(true).fill_color(Color::RED);

        style.apply(&StylePatch::new().bold(false).fill_color(Color::WHITE));

        assert!(!style.font.bold);
        assert_eq!(style.fill, FillStyle::Solid { color: Color::WHITE });
    }

    #[test]
    fn test_empty_patch() {
        assert!(StylePatch::new().is_empty());
        assert!(!StylePatch::new().italic(true).is_empty());
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::RED.to_argb_hex(), "FFFF0000");
        assert_eq!(Color::from_hex("xyz"), None);
    }
}
