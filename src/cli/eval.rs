//! Evaluate, parse or tokenize expressions given on the command line

use super::CliError;
use crate::{
    Config, Variable, evaluate_with, lexer,
    output::{to_json, to_json_pretty},
    parse_with,
};

/// Options shared by the eval and parse commands
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression text
    pub expression: String,
    /// Variables in the order given on the command line
    pub variables: Vec<Variable>,
    pub config: Config,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Evaluate the expression and return the result text
pub fn execute_eval(options: &EvalOptions) -> Result<String, CliError> {
    Ok(evaluate_with(&options.expression, &options.variables, &options.config)?)
}

/// Parse the expression and return its tree as JSON
pub fn execute_parse(options: &EvalOptions) -> Result<String, CliError> {
    let tree = parse_with(&options.expression, &options.variables, &options.config)?;
    Ok(if options.pretty {
        to_json_pretty(&tree)
    } else {
        to_json(&tree)
    })
}

/// Tokenize the expression, one `line:column  TYPE  text` row per token
pub fn execute_tokens(expression: &str) -> Result<Vec<String>, CliError> {
    let tokens = lexer::tokenize(expression)?;
    Ok(tokens
        .iter()
        .map(|t| format!("{:<8}{:<10}{}", t.position.to_string(), t.kind, t))
        .collect())
}
