//! Formula token types

use std::fmt;

/// Arithmetic operators and parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LeftParen,
    RightParen,
}

impl Operator {
    /// Parse an operator symbol
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "(" => Some(Operator::LeftParen),
            ")" => Some(Operator::RightParen),
            _ => None,
        }
    }

    /// Get the symbol for this operator
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
        }
    }

    /// `+` or `-`
    pub fn is_additive(&self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }

    /// `*` or `/`
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A validated formula token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Non-negative numeric literal
    Number(f64),
    /// Normalized variable name
    Variable(String),
    /// Operator or parenthesis
    Operator(Operator),
}

impl Token {
    /// Number, variable or closing parenthesis: what may be followed by a
    /// binary operator
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::Operator(Operator::RightParen)
        )
    }

    /// Number or variable
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }

    /// Get the variable name if this is a variable
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Token::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Shortest representation that parses back to the same double
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}
