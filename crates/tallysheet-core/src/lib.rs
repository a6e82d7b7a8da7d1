//! # tallysheet-core
//!
//! Core data types for the tallysheet calculation engine.
//!
//! This crate provides the fundamental types shared by the formula crate and
//! the spreadsheet engine:
//! - [`CellValue`] - The evaluated value of a cell (number, text or error)
//! - [`FormulaError`] - The error value produced by a failed evaluation
//! - [`NameRules`] - Normalizer and validator hooks for variable and cell names
//!
//! ## Example
//!
//! ```rust
//! use tallysheet_core::NameRules;
//!
//! let rules = NameRules::new().with_normalizer(|s| s.to_uppercase());
//!
//! assert_eq!(rules.resolve("a1").unwrap(), "A1");
//! assert!(rules.resolve("1a").is_err());
//! ```

pub mod cell;
pub mod error;
pub mod name;

// Re-exports for convenience
pub use cell::{CellValue, FormulaError};
pub use error::{Error, Result};
pub use name::{is_variable_name, NameRules};
