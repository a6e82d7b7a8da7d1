//! Prelude module - common imports for tallysheet users
//!
//! ```rust
//! use tallysheet::prelude::*;
//! ```

pub use crate::{
    CellContent,
    CellValue,
    // Error types
    Error,
    Formula,
    FormulaError,
    FormulaFormatError,
    NameRules,
    ReadWriteError,
    Result,
    // Main types
    Spreadsheet,
    SpreadsheetOptions,
};
