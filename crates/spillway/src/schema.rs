//! Column schema and row records

use ahash::AHashMap;

use spillway_core::{CellType, CellValue};

/// One column of an export: source field key, display header, declared type
///
/// Identity is positional within a [`ColumnSchema`]. Once written to a
/// sheet's header row the definition is immutable from this crate's
/// perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Key used to resolve the column's value from a [`RowRecord`]
    pub field: String,
    /// Text written to the header row
    pub header: String,
    /// Declared value type, drives coercion on write
    pub kind: CellType,
}

impl ColumnDefinition {
    /// Create a column definition
    pub fn new<F, H>(field: F, header: H, kind: CellType) -> Self
    where
        F: Into<String>,
        H: Into<String>,
    {
        Self {
            field: field.into(),
            header: header.into(),
            kind,
        }
    }

    /// Create a text column
    pub fn text<F, H>(field: F, header: H) -> Self
    where
        F: Into<String>,
        H: Into<String>,
    {
        Self::new(field, header, CellType::Text)
    }

    /// Create a numeric column
    pub fn number<F, H>(field: F, header: H) -> Self
    where
        F: Into<String>,
        H: Into<String>,
    {
        Self::new(field, header, CellType::Number)
    }
}

/// Ordered sequence of column definitions, shared by all sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<ColumnDefinition>,
}

impl ColumnSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder-style
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a column
    pub fn push(&mut self, column: ColumnDefinition) {
        self.columns.push(column);
    }

    /// Get the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by 0-based position
    pub fn get(&self, index: usize) -> Option<&ColumnDefinition> {
        self.columns.get(index)
    }

    /// Iterate over the columns in order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }
}

impl From<Vec<ColumnDefinition>> for ColumnSchema {
    fn from(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }
}

impl FromIterator<ColumnDefinition> for ColumnSchema {
    fn from_iter<T: IntoIterator<Item = ColumnDefinition>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// One input row: a field-keyed map of cell values
///
/// Fields are resolved by [`ColumnDefinition::field`]; a schema field with
/// no entry in the record is an error at write time, not a silent blank.
#[derive(Debug, Clone, Default)]
pub struct RowRecord {
    values: AHashMap<String, CellValue>,
}

impl RowRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, builder-style
    pub fn with<F, V>(mut self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<CellValue>,
    {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Set a field
    pub fn set<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<CellValue>,
    {
        self.values.insert(field.into(), value.into());
    }

    /// Get a field's value
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field)
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F: Into<String>, V: Into<CellValue>> FromIterator<(F, V)> for RowRecord {
    fn from_iter<T: IntoIterator<Item = (F, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(f, v)| (f.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder() {
        let schema = ColumnSchema::new()
            .with_column(ColumnDefinition::text("id", "ID"))
            .with_column(ColumnDefinition::number("amount", "Amount"));

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get(0).unwrap().header, "ID");
        assert_eq!(schema.get(1).unwrap().kind, CellType::Number);
    }

    #[test]
    fn test_row_record() {
        let row = RowRecord::new().with("id", "r1").with("amount", 12.5);

        assert_eq!(row.get("id").unwrap().as_str(), Some("r1"));
        assert_eq!(row.get("amount").unwrap().as_number(), Some(12.5));
        assert!(row.get("missing").is_none());
        assert!(row.contains("id"));
    }
}
