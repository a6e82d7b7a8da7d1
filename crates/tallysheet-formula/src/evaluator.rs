//! Formula evaluator
//!
//! Classic two-stack infix evaluation over a validated token sequence.
//! `*` and `/` bind tighter than `+` and `-`; equal precedence associates
//! left to right.

use tallysheet_core::FormulaError;

use crate::token::{Operator, Token};

/// Evaluate a validated token sequence
///
/// `lookup` returns the value of a variable, or `None` when the variable has
/// no numeric value. Evaluation stops at the first unknown variable or
/// division by zero.
pub(crate) fn evaluate<F>(tokens: &[Token], mut lookup: F) -> Result<f64, FormulaError>
where
    F: FnMut(&str) -> Option<f64>,
{
    let mut stacks = Stacks::default();

    for token in tokens {
        match token {
            Token::Number(n) => stacks.push_operand(*n)?,
            Token::Variable(name) => {
                let value = lookup(name).ok_or(FormulaError::BadVariable)?;
                stacks.push_operand(value)?;
            }
            Token::Operator(op) if op.is_additive() => {
                if stacks.top_is(Operator::is_additive) {
                    stacks.apply_top()?;
                }
                stacks.operators.push(*op);
            }
            Token::Operator(Operator::RightParen) => {
                if stacks.top_is(Operator::is_additive) {
                    stacks.apply_top()?;
                }
                // Matching '('
                stacks.operators.pop();
                if stacks.top_is(Operator::is_multiplicative) {
                    stacks.apply_top()?;
                }
            }
            Token::Operator(op) => stacks.operators.push(*op),
        }
    }

    if stacks.top_is(Operator::is_additive) {
        stacks.apply_top()?;
    }

    debug_assert_eq!(stacks.values.len(), 1, "unbalanced token sequence");
    Ok(stacks.values.pop().unwrap_or_default())
}

#[derive(Default)]
struct Stacks {
    values: Vec<f64>,
    operators: Vec<Operator>,
}

impl Stacks {
    fn top_is(&self, predicate: fn(&Operator) -> bool) -> bool {
        self.operators.last().is_some_and(predicate)
    }

    /// Push a value, completing a pending `*` or `/` immediately
    fn push_operand(&mut self, value: f64) -> Result<(), FormulaError> {
        self.values.push(value);
        if self.top_is(Operator::is_multiplicative) {
            self.apply_top()?;
        }
        Ok(())
    }

    /// Pop the top operator and two values, push the result
    fn apply_top(&mut self) -> Result<(), FormulaError> {
        debug_assert!(
            self.values.len() >= 2
                && self
                    .operators
                    .last()
                    .is_some_and(|op| op.is_additive() || op.is_multiplicative()),
            "operator applied without two operands"
        );
        let (Some(op), Some(right), Some(left)) =
            (self.operators.pop(), self.values.pop(), self.values.pop())
        else {
            return Ok(());
        };

        let result = match op {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    return Err(FormulaError::DivideByZero);
                }
                left / right
            }
            Operator::LeftParen | Operator::RightParen => return Ok(()),
        };

        self.values.push(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tokens;
    use pretty_assertions::assert_eq;
    use tallysheet_core::NameRules;

    fn eval(text: &str) -> Result<f64, FormulaError> {
        let tokens = parse_tokens(text, &NameRules::default()).unwrap();
        evaluate(&tokens, |name| match name {
            "x" => Some(2.0),
            "y" => Some(5.0),
            "zero" => Some(0.0),
            _ => None,
        })
    }

    #[test]
    fn test_single_value() {
        assert_eq!(eval("7"), Ok(7.0));
        assert_eq!(eval("x"), Ok(2.0));
        assert_eq!(eval("((y))"), Ok(5.0));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("2 * 3 + 4 * 5"), Ok(26.0));
        assert_eq!(eval("10 - 6 / 2"), Ok(7.0));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("2 - 3 - 4"), Ok(-5.0));
        assert_eq!(eval("8 / 2 / 2"), Ok(2.0));
        assert_eq!(eval("1 - 2 + 3"), Ok(2.0));
        assert_eq!(eval("12 / 3 * 2"), Ok(8.0));
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(eval("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(eval("2 * (3 + 4)"), Ok(14.0));
        assert_eq!(eval("(2 + x) * (y - 1) / 4"), Ok(4.0));
        assert_eq!(eval("2 - (3 - 4)"), Ok(3.0));
        assert_eq!(eval("((1 + 1) * (2 + 2)) / (x * x)"), Ok(2.0));
    }

    #[test]
    fn test_variables() {
        assert_eq!(eval("x * y + x"), Ok(12.0));
        assert_eq!(eval("y / x"), Ok(2.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1 / 0"), Err(FormulaError::DivideByZero));
        assert_eq!(eval("1 / zero"), Err(FormulaError::DivideByZero));
        assert_eq!(eval("5 / (2 - 2)"), Err(FormulaError::DivideByZero));
        assert_eq!(eval("5 / (x - 2) + 1"), Err(FormulaError::DivideByZero));
        assert_eq!(eval("0 / 5"), Ok(0.0));
    }

    #[test]
    fn test_unknown_variable() {
        assert_eq!(eval("x + nope"), Err(FormulaError::BadVariable));
        assert_eq!(eval("(nope)"), Err(FormulaError::BadVariable));
    }

    #[test]
    fn test_lookup_called_per_occurrence() {
        let tokens = parse_tokens("a + a * b", &NameRules::default()).unwrap();
        let mut calls = Vec::new();
        let result = evaluate(&tokens, |name| {
            calls.push(name.to_string());
            Some(3.0)
        });
        assert_eq!(result, Ok(12.0));
        assert_eq!(calls, vec!["a", "a", "b"]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "operator applied without two operands")]
    fn test_dangling_operator_panics_in_debug() {
        let _ = evaluate(&[Token::Operator(Operator::Add)], |_| None);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unbalanced token sequence")]
    fn test_empty_sequence_panics_in_debug() {
        let _ = evaluate(&[], |_| None);
    }
}
