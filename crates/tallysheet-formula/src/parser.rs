//! Formula construction
//!
//! Turns formula text into a validated token sequence:
//!
//! 1. tokenize, rejecting empty input
//! 2. normalize every variable-shaped lexeme
//! 3. classify each lexeme as operator, number or variable
//! 4. run every variable through the validator
//! 5. check the infix grammar

use lazy_regex::regex_is_match;
use tallysheet_core::{is_variable_name, NameRules};

use crate::error::{FormulaFormatError, FormulaResult, SyntaxError};
use crate::lexer::tokenize;
use crate::token::{Operator, Token};

/// Parse formula text into a validated token sequence
pub(crate) fn parse_tokens(text: &str, rules: &NameRules) -> FormulaResult<Vec<Token>> {
    let lexemes: Vec<String> = tokenize(text)
        .map(|lexeme| {
            if is_variable_name(lexeme) {
                rules.normalize(lexeme)
            } else {
                lexeme.to_string()
            }
        })
        .collect();

    if lexemes.is_empty() {
        return Err(FormulaFormatError::EmptyFormula);
    }

    let tokens = lexemes
        .iter()
        .map(|lexeme| classify(lexeme))
        .collect::<FormulaResult<Vec<Token>>>()?;

    if let Some(rejected) = tokens
        .iter()
        .filter_map(Token::as_variable)
        .find(|name| !rules.is_valid(name))
    {
        return Err(FormulaFormatError::RejectedVariable(rejected.to_string()));
    }

    check_syntax(&tokens)?;
    Ok(tokens)
}

/// Check whether a lexeme is an unsigned double literal
pub(crate) fn is_number_literal(s: &str) -> bool {
    regex_is_match!(
        r"^(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+\-]?[0-9]+)?$",
        s
    )
}

fn classify(lexeme: &str) -> FormulaResult<Token> {
    if let Some(op) = Operator::from_symbol(lexeme) {
        return Ok(Token::Operator(op));
    }

    if is_number_literal(lexeme) {
        // Literals that overflow to infinity could not be rendered back
        return match lexeme.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(FormulaFormatError::InvalidToken(lexeme.to_string())),
        };
    }

    if is_variable_name(lexeme) {
        return Ok(Token::Variable(lexeme.to_string()));
    }

    Err(FormulaFormatError::InvalidToken(lexeme.to_string()))
}

fn check_syntax(tokens: &[Token]) -> Result<(), SyntaxError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Ok(());
    };

    if !(first.is_value() || *first == Token::Operator(Operator::LeftParen)) {
        return Err(SyntaxError::InvalidFirstToken(first.to_string()));
    }

    let mut open: usize = 0;
    let mut previous: Option<&Token> = None;

    for (position, token) in tokens.iter().enumerate() {
        if let Some(prev) = previous {
            check_pair(prev, token)?;
        }

        match token {
            Token::Operator(Operator::LeftParen) => open += 1,
            Token::Operator(Operator::RightParen) => {
                open = open
                    .checked_sub(1)
                    .ok_or(SyntaxError::OverClosedParenthesis { position })?;
            }
            _ => {}
        }

        previous = Some(token);
    }

    if !(last.is_value() || *last == Token::Operator(Operator::RightParen)) {
        return Err(SyntaxError::InvalidLastToken(last.to_string()));
    }

    if open != 0 {
        return Err(SyntaxError::UnbalancedParentheses { unclosed: open });
    }

    Ok(())
}

/// Check that `next` may directly follow `prev`
///
/// After a number, variable or `)` only a binary operator or `)` may come.
/// After a binary operator or `(` only a number, variable or `(` may come.
fn check_pair(prev: &Token, next: &Token) -> Result<(), SyntaxError> {
    let pair = || (prev.to_string(), next.to_string());

    if prev.ends_operand() {
        match next {
            Token::Number(_) | Token::Variable(_) if prev.is_value() => {
                let (previous, next) = pair();
                Err(SyntaxError::ConsecutiveValues { previous, next })
            }
            Token::Number(_) | Token::Variable(_) | Token::Operator(Operator::LeftParen) => {
                let (previous, next) = pair();
                Err(SyntaxError::MissingOperator { previous, next })
            }
            Token::Operator(_) => Ok(()),
        }
    } else {
        match next {
            Token::Number(_) | Token::Variable(_) | Token::Operator(Operator::LeftParen) => Ok(()),
            Token::Operator(_) => {
                let (previous, next) = pair();
                Err(SyntaxError::ConsecutiveOperators { previous, next })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> FormulaResult<Vec<Token>> {
        parse_tokens(text, &NameRules::default())
    }

    fn syntax_error(text: &str) -> SyntaxError {
        match parse(text) {
            Err(FormulaFormatError::Syntax(e)) => e,
            other => panic!("expected syntax error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_tokens() {
        let tokens = parse("(x + 2.50) * y1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operator(Operator::LeftParen),
                Token::Variable("x".into()),
                Token::Operator(Operator::Add),
                Token::Number(2.5),
                Token::Operator(Operator::RightParen),
                Token::Operator(Operator::Multiply),
                Token::Variable("y1".into()),
            ]
        );
    }

    #[test]
    fn test_number_literal_grammar() {
        assert!(is_number_literal("0"));
        assert!(is_number_literal("3."));
        assert!(is_number_literal(".25"));
        assert!(is_number_literal("6.02e23"));
        assert!(is_number_literal("1E-9"));
        assert!(!is_number_literal("-1"));
        assert!(!is_number_literal("."));
        assert!(!is_number_literal("1e"));
        assert!(!is_number_literal("inf"));
    }

    #[test]
    fn test_empty_formula() {
        assert_eq!(parse(""), Err(FormulaFormatError::EmptyFormula));
        assert_eq!(parse("  \t"), Err(FormulaFormatError::EmptyFormula));
    }

    #[test]
    fn test_invalid_tokens() {
        assert_eq!(
            parse("1 + $"),
            Err(FormulaFormatError::InvalidToken("$".into()))
        );
        assert_eq!(
            parse("2 ^ 3"),
            Err(FormulaFormatError::InvalidToken("^".into()))
        );
        assert_eq!(
            parse("1e999"),
            Err(FormulaFormatError::InvalidToken("1e999".into()))
        );
    }

    #[test]
    fn test_normalized_variable_must_match_grammar() {
        let rules = NameRules::new().with_normalizer(|s| format!("#{s}"));
        assert_eq!(
            parse_tokens("a + 1", &rules),
            Err(FormulaFormatError::InvalidToken("#a".into()))
        );
    }

    #[test]
    fn test_rejected_variable() {
        let rules = NameRules::new().with_validator(|s| s.starts_with('a'));
        assert!(parse_tokens("a1 + a2", &rules).is_ok());
        assert_eq!(
            parse_tokens("a1 + b2", &rules),
            Err(FormulaFormatError::RejectedVariable("b2".into()))
        );
    }

    #[test]
    fn test_invalid_token_reported_before_rejected_variable() {
        let rules = NameRules::new().with_validator(|_| false);
        assert_eq!(
            parse_tokens("x + $", &rules),
            Err(FormulaFormatError::InvalidToken("$".into()))
        );
    }

    #[test]
    fn test_first_and_last_token() {
        assert_eq!(syntax_error("+1"), SyntaxError::InvalidFirstToken("+".into()));
        assert_eq!(syntax_error(")"), SyntaxError::InvalidFirstToken(")".into()));
        assert_eq!(syntax_error("1+"), SyntaxError::InvalidLastToken("+".into()));
        assert_eq!(syntax_error("(1"), SyntaxError::UnbalancedParentheses { unclosed: 1 });
    }

    #[test]
    fn test_consecutive_values() {
        assert_eq!(
            syntax_error("1 2"),
            SyntaxError::ConsecutiveValues {
                previous: "1".into(),
                next: "2".into()
            }
        );
        assert!(matches!(
            syntax_error("2x+y3"),
            SyntaxError::ConsecutiveValues { .. }
        ));
    }

    #[test]
    fn test_consecutive_operators() {
        assert!(matches!(
            syntax_error("1 + * 2"),
            SyntaxError::ConsecutiveOperators { .. }
        ));
        assert!(matches!(
            syntax_error("(+1)"),
            SyntaxError::ConsecutiveOperators { .. }
        ));
        assert!(matches!(
            syntax_error("1 + ()"),
            SyntaxError::ConsecutiveOperators { .. }
        ));
        assert!(matches!(
            syntax_error("(1 +) 2"),
            SyntaxError::ConsecutiveOperators { .. }
        ));
    }

    #[test]
    fn test_missing_operator() {
        assert!(matches!(
            syntax_error("(1)(2)"),
            SyntaxError::MissingOperator { .. }
        ));
        assert!(matches!(
            syntax_error("(1) 2"),
            SyntaxError::MissingOperator { .. }
        ));
        assert!(matches!(
            syntax_error("2(3)"),
            SyntaxError::MissingOperator { .. }
        ));
    }

    #[test]
    fn test_parentheses_balance() {
        assert_eq!(
            syntax_error("(1))+(2"),
            SyntaxError::OverClosedParenthesis { position: 3 }
        );
        assert_eq!(
            syntax_error("((1+2)"),
            SyntaxError::UnbalancedParentheses { unclosed: 1 }
        );
        assert!(parse("((1)) + (((2)))").is_ok());
    }
}
