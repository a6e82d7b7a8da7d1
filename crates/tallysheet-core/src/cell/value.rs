//! Cell value types

use std::fmt;

/// Represents the evaluated value of a cell
///
/// An empty (absent) cell has the value `Text("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),

    /// Error produced while evaluating a formula (#DIV/0!, #BADVAR)
    Error(FormulaError),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// The value of a cell that does not exist
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Check if this is the empty text value
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Try to get the value as a number
    ///
    /// Only numeric values convert; text and errors never do.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the error if this is one
    pub fn as_error(&self) -> Option<FormulaError> {
        match self {
            CellValue::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<FormulaError> for CellValue {
    fn from(e: FormulaError) -> Self {
        CellValue::Error(e)
    }
}

impl From<Result<f64, FormulaError>> for CellValue {
    fn from(result: Result<f64, FormulaError>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

/// Error values produced by formula evaluation
///
/// These are data, not failures: a formula that divides by zero still
/// evaluates, and its cell holds the error as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaError {
    /// #DIV/0! - Division by zero
    DivideByZero,
    /// #BADVAR - A variable had no numeric value
    BadVariable,
}

impl FormulaError {
    /// Get the reason string for this error
    pub fn reason(&self) -> &'static str {
        match self {
            FormulaError::DivideByZero => "#DIV/0!",
            FormulaError::BadVariable => "#BADVAR",
        }
    }

    /// Parse a reason string
    pub fn from_reason(s: &str) -> Option<Self> {
        match s {
            "#DIV/0!" => Some(FormulaError::DivideByZero),
            "#BADVAR" => Some(FormulaError::BadVariable),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_value() {
        assert!(CellValue::empty().is_empty());
        assert!(CellValue::default().is_empty());
        assert!(!CellValue::text(" ").is_empty());
        assert_eq!(CellValue::empty().to_string(), "");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(CellValue::text("2.5").as_number(), None);
        assert_eq!(CellValue::Error(FormulaError::BadVariable).as_number(), None);
    }

    #[test]
    fn test_error_reasons() {
        assert_eq!(FormulaError::DivideByZero.reason(), "#DIV/0!");
        assert_eq!(FormulaError::BadVariable.to_string(), "#BADVAR");
        assert_eq!(
            FormulaError::from_reason("#DIV/0!"),
            Some(FormulaError::DivideByZero)
        );
        assert_eq!(FormulaError::from_reason("#REF!"), None);
    }

    #[test]
    fn test_from_evaluation() {
        assert_eq!(CellValue::from(Ok(3.0)), CellValue::Number(3.0));
        assert_eq!(
            CellValue::from(Err(FormulaError::DivideByZero)),
            CellValue::Error(FormulaError::DivideByZero)
        );
        assert!(CellValue::from(Err(FormulaError::BadVariable)).is_error());
    }
}
