//! Cell content

use std::fmt;

use tallysheet_core::{CellValue, NameRules};
use tallysheet_formula::{Formula, FormulaResult};

/// The editable content of a cell
///
/// An absent cell has the content `Text("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Number(f64),
    Text(String),
    Formula(Formula),
}

impl CellContent {
    /// Classify a content string
    ///
    /// Text that parses as a finite double is a number, text starting with
    /// `=` is a formula over the rest of the string, anything else is text.
    pub fn parse(content: &str, rules: &NameRules) -> FormulaResult<Self> {
        if let Ok(n) = content.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContent::Number(n));
            }
        }

        match content.strip_prefix('=') {
            Some(formula) => Formula::with_rules(formula, rules).map(CellContent::Formula),
            None => Ok(CellContent::Text(content.to_string())),
        }
    }

    /// Empty text, the content of a cell that is not stored
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Text(s) if s.is_empty())
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContent::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// The string form that [`CellContent::parse`] maps back to this content
    pub fn content_string(&self) -> String {
        self.to_string()
    }
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Text(String::new())
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellContent::Number(n) => write!(f, "{}", n),
            CellContent::Text(s) => f.write_str(s),
            CellContent::Formula(formula) => write!(f, "={}", formula),
        }
    }
}

/// A stored cell: its content and the value last computed from it
#[derive(Debug, Clone)]
pub(crate) struct Cell {
    pub(crate) content: CellContent,
    pub(crate) value: CellValue,
}

impl Cell {
    pub(crate) fn new(content: CellContent) -> Self {
        Self {
            content,
            value: CellValue::empty(),
        }
    }
}
