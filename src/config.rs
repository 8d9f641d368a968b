//! Interpreter settings.

/// Default limit on expression nesting (parenthesised groups and function
/// calls) for both parsing and evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Settings shared by the parser and the evaluator.
///
/// # Examples
///
/// ```
/// use infa_expr::{Config, evaluate_with};
///
/// let config = Config::default().with_max_depth(2);
/// assert!(evaluate_with("ABS(ABS(ABS(-1)))", &[], &config).is_err());
/// assert_eq!(evaluate_with("ABS(-1)", &[], &config).unwrap(), "1.000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest nesting accepted before failing with a nesting error
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
