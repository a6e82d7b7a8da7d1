//! # tallysheet
//!
//! A formula-driven calculation engine.
//!
//! Cells are named (`A1`, `total`, `_tmp3`) and hold a number, text or a
//! formula over other cells. Every edit records which cells reference which,
//! rejects edits that would create a circular reference, and re-evaluates the
//! edited cell and everything depending on it in a safe order.
//!
//! ## Features
//!
//! - Infix formulas with `+ - * /` and parentheses
//! - Caller-supplied normalizer and validator for cell names
//! - Cycle detection with full rollback of rejected edits
//! - Evaluation errors (`#DIV/0!`, `#BADVAR`) stored as cell values
//! - JSON persistence
//!
//! ## Example
//!
//! ```rust
//! use tallysheet::prelude::*;
//!
//! let options = SpreadsheetOptions::default()
//!     .with_rules(NameRules::new().with_normalizer(|s| s.to_uppercase()));
//! let mut sheet = Spreadsheet::with_options(options);
//!
//! sheet.set_contents_of_cell("a1", "4").unwrap();
//! sheet.set_contents_of_cell("b1", "=10 / a1").unwrap();
//! assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(2.5));
//!
//! // Edits that would create a cycle are rejected
//! assert!(matches!(
//!     sheet.set_contents_of_cell("a1", "=b1"),
//!     Err(Error::CircularReference(_))
//! ));
//!
//! // Evaluation errors are values, not failures
//! sheet.set_contents_of_cell("a1", "0").unwrap();
//! assert_eq!(
//!     sheet.cell_value("B1").unwrap(),
//!     CellValue::Error(FormulaError::DivideByZero)
//! );
//! ```

pub mod cell;
pub mod error;
mod persist;
pub mod prelude;
mod recalc;
pub mod spreadsheet;

pub use cell::CellContent;
pub use error::{Error, ReadWriteError, Result};
pub use spreadsheet::{Spreadsheet, SpreadsheetOptions, DEFAULT_VERSION};

// Re-export core types
pub use tallysheet_core::{is_variable_name, CellValue, FormulaError, NameRules};

// Re-export formula types
pub use tallysheet_formula::{
    DependencyGraph, Formula, FormulaFormatError, FormulaResult, SyntaxError,
};
