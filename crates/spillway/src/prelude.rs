//! Prelude module - common imports for spillway users
//!
//! ```rust
//! use spillway::prelude::*;
//! ```

pub use crate::{
    // Cancellation
    CancelToken,
    // Cell types
    CellType,
    CellValue,
    Color,
    // Schema types
    ColumnDefinition,
    ColumnRef,
    ColumnSchema,

    // Error types
    ExportError,
    // Main types
    ExportWorkbook,
    FillStyle,
    HorizontalAlignment,
    Result,
    RowRecord,

    // Style types
    Style,
    StylePatch,
    StyleRule,

    // I/O types
    XlsxWriter,
};
