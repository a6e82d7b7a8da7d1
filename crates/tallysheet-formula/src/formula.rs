//! The validated formula type

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tallysheet_core::{FormulaError, NameRules};

use crate::error::{FormulaFormatError, FormulaResult};
use crate::evaluator;
use crate::parser::parse_tokens;
use crate::token::Token;

/// An infix arithmetic formula over numbers and variables
///
/// Formulas are written with non-negative double literals (no unary sign),
/// variables, parentheses and the operators `+ - * /`. A `Formula` can only
/// be obtained through validation and is immutable afterwards, so every
/// instance is syntactically well formed.
///
/// Two formulas are equal when their canonical renderings are equal: numbers
/// compare by value (`2.000` equals `2`) and variables by normalized name.
///
/// ```rust
/// use tallysheet_core::NameRules;
/// use tallysheet_formula::Formula;
///
/// let f = Formula::new("x + 2.000 * y").unwrap();
/// assert_eq!(f.to_string(), "x+2*y");
/// assert_eq!(f.variables(), ["x", "y"]);
///
/// let rules = NameRules::new().with_normalizer(|s| s.to_uppercase());
/// let g = Formula::with_rules("x1 + y2", &rules).unwrap();
/// assert_eq!(g, Formula::new("X1  +  Y2").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parse a formula with the identity normalizer and an always-true validator
    pub fn new(text: &str) -> FormulaResult<Self> {
        Self::with_rules(text, &NameRules::default())
    }

    /// Parse a formula, normalizing and validating every variable with `rules`
    pub fn with_rules(text: &str, rules: &NameRules) -> FormulaResult<Self> {
        let tokens = parse_tokens(text, rules)?;
        Ok(Self { tokens })
    }

    /// Evaluate the formula
    ///
    /// `lookup` maps a (normalized) variable to its value, or `None` when the
    /// variable has none. Never panics and never fails hard: an unknown
    /// variable yields [`FormulaError::BadVariable`] and a zero divisor
    /// yields [`FormulaError::DivideByZero`].
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, FormulaError>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        evaluator::evaluate(&self.tokens, lookup)
    }

    /// The distinct normalized variables, in order of first occurrence
    pub fn variables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.tokens.iter().filter_map(Token::as_variable) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    /// The validated token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Self::new(s)
    }
}
