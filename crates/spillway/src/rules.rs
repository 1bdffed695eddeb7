//! Column style rules

use spillway_core::StylePatch;

/// How a style rule addresses its column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    /// 1-based column position, addressing the header cell directly
    Index(u16),
    /// Header text to match, exact and case-sensitive; first match wins
    Name(String),
}

/// A sparse style patch targeted at one column's header cell
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The column to style
    pub column: ColumnRef,
    /// The attributes to change; unset attributes are left untouched
    pub patch: StylePatch,
}

impl StyleRule {
    /// Create a rule addressing a column by 1-based position
    pub fn by_index(index: u16, patch: StylePatch) -> Self {
        Self {
            column: ColumnRef::Index(index),
            patch,
        }
    }

    /// Create a rule addressing a column by header text
    pub fn by_name<S: Into<String>>(name: S, patch: StylePatch) -> Self {
        Self {
            column: ColumnRef::Name(name.into()),
            patch,
        }
    }
}
