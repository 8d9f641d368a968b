//! CLI support for infa-expr
//!
//! Provides programmatic access to the command-line operations so other
//! tools can embed them.

mod convert;
mod docs;
mod eval;
pub mod logging;

pub use convert::{parse_variable_spec, variables_from_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview, list_functions};
pub use eval::{EvalOptions, execute_eval, execute_parse, execute_tokens};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Lex, parse or evaluation failure
    #[error("{0}")]
    Expression(#[from] crate::Error),

    /// `--vars` is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `--vars`/`--var` is well-formed but not a usable variable list
    #[error("Invalid variable: {0}")]
    Variable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No expression given and nothing on stdin
    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'infa-expr docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Expression(e.into())
    }
}
