//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The evaluated value of a cell
//! - [`FormulaError`] - The error value produced by a failed evaluation

mod value;

pub use value::{CellValue, FormulaError};
