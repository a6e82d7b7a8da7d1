//! Formula error types

use thiserror::Error;

/// Result type for formula construction
pub type FormulaResult<T> = std::result::Result<T, FormulaFormatError>;

/// Errors that can occur while constructing a formula
///
/// A formula that fails any of these checks is never created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaFormatError {
    /// The text contains no tokens
    #[error("Formula contains no tokens")]
    EmptyFormula,

    /// A token is not an operator, a number or a variable
    #[error("Invalid token: '{0}'")]
    InvalidToken(String),

    /// A normalized variable failed the validator
    #[error("Variable rejected by validator: '{0}'")]
    RejectedVariable(String),

    /// The token sequence is not a well-formed infix expression
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

/// The syntax rule a token sequence violates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// First token is not a number, variable or opening parenthesis
    #[error("first token '{0}' is not a number, variable or opening parenthesis")]
    InvalidFirstToken(String),

    /// Last token is not a number, variable or closing parenthesis
    #[error("last token '{0}' is not a number, variable or closing parenthesis")]
    InvalidLastToken(String),

    /// A number or variable directly follows another number or variable
    #[error("value '{next}' directly follows value '{previous}'")]
    ConsecutiveValues { previous: String, next: String },

    /// An operator or closing parenthesis follows an operator or opening parenthesis
    #[error("operator '{next}' directly follows '{previous}'")]
    ConsecutiveOperators { previous: String, next: String },

    /// A value or opening parenthesis follows a closing parenthesis, or an
    /// opening parenthesis follows a value
    #[error("missing operator between '{previous}' and '{next}'")]
    MissingOperator { previous: String, next: String },

    /// A closing parenthesis has no opening parenthesis to match
    #[error("closing parenthesis at token {position} has no matching opening parenthesis")]
    OverClosedParenthesis { position: usize },

    /// Opening parentheses are left unclosed at the end of the formula
    #[error("{unclosed} opening parenthesis(es) left unclosed")]
    UnbalancedParentheses { unclosed: usize },
}
