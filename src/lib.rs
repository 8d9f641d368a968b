//! Interpreter for transformation-language formulas.
//!
//! Text is tokenized by the [`lexer`], folded into a single [`Node`] by the
//! [`parser`] (substituting caller-supplied [`Variable`]s on the way), and
//! reduced to a string by the [`evaluator`] through a [`FunctionRegistry`].
//!
//! ```
//! use infa_expr::{evaluate, Variable};
//!
//! let vars = [Variable::number("in_AMT", "-250")];
//! assert_eq!(evaluate("ABS(in_AMT)", &vars).unwrap(), "250.000000");
//! assert_eq!(evaluate("CONCAT('mike', 'knowles')", &[]).unwrap(), "mikeknowles");
//! ```
//!
//! All global tables (lexer rules, function catalog, built-in registry) are
//! built once on first use and are read-only afterwards, so `evaluate` may be
//! called from many threads at once.

pub mod ast;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod numeric;
pub mod output;
pub mod parser;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Arg, LeafKind, Node, Position, Token, TokenKind, Variable};
pub use config::Config;
pub use error::Error;
pub use evaluator::{EvalError, Evaluator};
pub use functions::FunctionRegistry;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};

use log::debug;

/// Parses `input` into its expression tree, substituting `vars`.
pub fn parse(input: &str, vars: &[Variable]) -> Result<Node, Error> {
    parse_with(input, vars, &Config::default())
}

pub fn parse_with(input: &str, vars: &[Variable], config: &Config) -> Result<Node, Error> {
    let parser = Parser::from_input(input, vars)?.with_config(config);
    Ok(parser.parse()?)
}

/// Parses and evaluates `input` with the built-in functions, returning the
/// text of the resulting value.
pub fn evaluate(input: &str, vars: &[Variable]) -> Result<String, Error> {
    evaluate_with(input, vars, &Config::default())
}

pub fn evaluate_with(input: &str, vars: &[Variable], config: &Config) -> Result<String, Error> {
    debug!("evaluating {:?}", input);
    let tree = parse_with(input, vars, config)?;
    let result = Evaluator::new().with_config(config).eval_to_string(tree)?;
    debug!("result {:?}", result);
    Ok(result)
}
