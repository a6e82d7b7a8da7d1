//! # tallysheet-formula
//!
//! Formula handling for tallysheet.
//!
//! This crate provides:
//! - Formula tokenizing (text → lexemes)
//! - Formula validation (lexemes → checked token sequence)
//! - Formula evaluation (tokens → number or [`FormulaError`])
//! - Dependency tracking between named cells
//!
//! ## Example
//!
//! ```rust
//! use tallysheet_formula::{Formula, FormulaError};
//!
//! let f = Formula::new("(a + 1) / b").unwrap();
//! assert_eq!(f.variables(), ["a", "b"]);
//!
//! let lookup = |name: &str| match name {
//!     "a" => Some(3.0),
//!     "b" => Some(2.0),
//!     _ => None,
//! };
//! assert_eq!(f.evaluate(lookup), Ok(2.0));
//! assert_eq!(f.evaluate(|_| None), Err(FormulaError::BadVariable));
//! ```

pub mod dependency;
pub mod error;
mod evaluator;
pub mod formula;
pub mod lexer;
mod parser;
pub mod token;

pub use dependency::DependencyGraph;
pub use error::{FormulaFormatError, FormulaResult, SyntaxError};
pub use formula::Formula;
pub use lexer::{tokenize, Lexemes};
pub use tallysheet_core::FormulaError;
pub use token::{Operator, Token};
