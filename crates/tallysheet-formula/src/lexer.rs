//! Formula tokenizer
//!
//! Splits raw formula text into lexemes: left paren, right paren, one of the
//! four operator symbols, a variable-shaped identifier, or an unsigned double
//! literal. Whitespace only delimits lexemes and is dropped. Text matching none
//! of these patterns is still emitted as its own lexeme so that the validator
//! can reject it.

use lazy_regex::{lazy_regex, Lazy, Regex};

static LEXEME: Lazy<Regex> = lazy_regex!(
    r"\(|\)|[+\-*/]|[A-Za-z_][A-Za-z_0-9]*|(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+\-]?[0-9]+)?|\s+"
);

/// Iterator over the lexemes of a formula string
///
/// A clone resumes from the same position. Call [`tokenize`] again to start
/// over from the beginning.
#[derive(Debug, Clone)]
pub struct Lexemes<'a> {
    input: &'a str,
    pos: usize,
}

/// Tokenize a formula string
///
/// ```rust
/// use tallysheet_formula::lexer::tokenize;
///
/// let lexemes: Vec<&str> = tokenize("(x1 + 2.5e3)*y").collect();
/// assert_eq!(lexemes, ["(", "x1", "+", "2.5e3", ")", "*", "y"]);
///
/// // Unrecognized text is kept, not dropped
/// let lexemes: Vec<&str> = tokenize("a $ b").collect();
/// assert_eq!(lexemes, ["a", "$", "b"]);
/// ```
pub fn tokenize(input: &str) -> Lexemes<'_> {
    Lexemes { input, pos: 0 }
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.input.len() {
            let start = self.pos;
            let lexeme = match LEXEME.find_at(self.input, start) {
                // Unmatched text before the next recognized lexeme
                Some(m) if m.start() > start => {
                    self.pos = m.start();
                    &self.input[start..m.start()]
                }
                Some(m) => {
                    self.pos = m.end();
                    m.as_str()
                }
                None => {
                    self.pos = self.input.len();
                    &self.input[start..]
                }
            };

            if !lexeme.trim().is_empty() {
                return Some(lexeme);
            }
        }
        None
    }
}
