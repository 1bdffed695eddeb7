//! Cell value and declared-type coercion

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// String value
    String(String),

    /// Date/time value
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a date/time
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(true) => write!(f, "TRUE"),
            CellValue::Boolean(false) => write!(f, "FALSE"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_hms_opt(0, 0, 0).unwrap_or_default())
    }
}

/// Declared value type of a column
///
/// Drives how raw row values are coerced before being written to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    /// Free text
    #[default]
    Text,
    /// Numeric (f64)
    Number,
    /// Boolean
    Boolean,
    /// Date/time
    DateTime,
}

impl CellType {
    /// Coerce a raw value to this declared type.
    ///
    /// Coercion is best-effort: a value that cannot be converted is written
    /// as-is rather than dropped, so the original input stays visible in the
    /// output document.
    pub fn coerce(self, raw: CellValue) -> CellValue {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        match self {
            CellType::Text => match raw {
                CellValue::String(_) => raw,
                other => CellValue::String(other.to_string()),
            },
            CellType::Number => match raw {
                CellValue::Number(_) => raw,
                CellValue::Boolean(b) => CellValue::Number(if b { 1.0 } else { 0.0 }),
                CellValue::String(ref s) => match s.trim().parse::<f64>() {
                    Ok(n) => CellValue::Number(n),
                    Err(_) => raw,
                },
                other => other,
            },
            CellType::Boolean => match raw {
                CellValue::Boolean(_) => raw,
                CellValue::Number(n) => CellValue::Boolean(n != 0.0),
                CellValue::String(ref s) => match s.trim() {
                    t if t.eq_ignore_ascii_case("true") => CellValue::Boolean(true),
                    t if t.eq_ignore_ascii_case("false") => CellValue::Boolean(false),
                    _ => raw,
                },
                other => other,
            },
            CellType::DateTime => match raw {
                CellValue::DateTime(_) => raw,
                CellValue::String(ref s) => {
                    let t = s.trim();
                    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
                        CellValue::DateTime(dt)
                    } else if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
                        CellValue::from(d)
                    } else {
                        raw
                    }
                }
                other => other,
            },
        }
    }
}
