//! Crate-level error type.

use crate::{evaluator::EvalError, lexer::LexError, parser::ParseError};

/// Any failure of [`crate::parse`] or [`crate::evaluate`].
///
/// All errors are terminal: no partial result is ever produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
