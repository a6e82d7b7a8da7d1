//! Variable and cell name rules
//!
//! Every variable token in a formula and every cell name goes through the same
//! two caller-supplied hooks:
//!
//! - a *normalizer* that maps a name to its canonical form (e.g. upper-casing),
//! - a *validator* that adds restrictions beyond the base grammar.
//!
//! The base grammar is a letter or underscore followed by zero or more
//! letters, digits or underscores.

use std::fmt;
use std::sync::Arc;

use lazy_regex::regex_is_match;

use crate::error::{Error, Result};

type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;
type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Check whether a string matches the variable grammar
///
/// ```rust
/// use tallysheet_core::is_variable_name;
///
/// assert!(is_variable_name("x23"));
/// assert!(is_variable_name("_tmp"));
/// assert!(!is_variable_name("2x"));
/// assert!(!is_variable_name("a b"));
/// ```
pub fn is_variable_name(s: &str) -> bool {
    regex_is_match!(r"^[A-Za-z_][A-Za-z_0-9]*$", s)
}

/// Normalizer and validator hooks applied to names
///
/// The default rules use the identity normalizer and accept every name that
/// matches the variable grammar.
#[derive(Clone)]
pub struct NameRules {
    normalize: Normalizer,
    is_valid: Validator,
}

impl NameRules {
    /// Create rules with the identity normalizer and an always-true validator
    pub fn new() -> Self {
        Self {
            normalize: Arc::new(|s| s.to_string()),
            is_valid: Arc::new(|_| true),
        }
    }

    /// Replace the normalizer
    pub fn with_normalizer<F>(mut self, normalize: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalize = Arc::new(normalize);
        self
    }

    /// Replace the validator
    pub fn with_validator<F>(mut self, is_valid: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.is_valid = Arc::new(is_valid);
        self
    }

    /// Apply the normalizer
    pub fn normalize(&self, name: &str) -> String {
        (self.normalize)(name)
    }

    /// Apply the validator (without checking the grammar)
    pub fn is_valid(&self, name: &str) -> bool {
        (self.is_valid)(name)
    }

    /// Normalize a name and check it against the grammar and the validator
    ///
    /// Returns the normalized name, or [`Error::InvalidName`] carrying the
    /// name as given.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let normalized = self.normalize(name);
        if is_variable_name(&normalized) && self.is_valid(&normalized) {
            Ok(normalized)
        } else {
            Err(Error::InvalidName(name.to_string()))
        }
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NameRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameRules").finish_non_exhaustive()
    }
}
