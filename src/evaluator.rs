use log::debug;

use crate::{
    ast::{Arg, Node},
    config::Config,
    functions::FunctionRegistry,
};

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Node tag has no entry in the function registry
    #[error("the function {0} either is invalid or hasn't been implemented by this library")]
    UnknownFunction(String),

    /// Function called with an unsupported number of arguments
    #[error("incorrect number of arguments, {got}, to {function} (expected {expected})")]
    Arity {
        function: String,
        expected: String,
        got: usize,
    },

    /// Numeric argument whose payload does not parse as a number
    #[error("{function}: '{text}' is not a valid number")]
    InvalidNumber { function: String, text: String },

    /// Character code outside the Unicode scalar range
    #[error("{function}: {value} is not a valid character code")]
    InvalidCodepoint { function: String, value: i64 },

    /// Argument that is not a single-valued leaf
    #[error("{function}: expected a value but got a {tag} node")]
    MissingValue { function: String, tag: String },

    /// Non-leaf node carrying a raw value where a sub-node belongs
    #[error("node {tag} holds a raw value where a sub-expression was expected")]
    MalformedNode { tag: String },

    /// Evaluation finished on something other than a single value
    #[error("expression reduced to {tag} instead of a value")]
    NotReduced { tag: String },

    /// Tree nested deeper than the configured limit
    #[error("expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Reduces expression trees to leaves.
///
/// Evaluation is post-order: arguments are reduced left to right, then the
/// node's function is looked up by tag and called on the reduced arguments.
/// Leaves (`NUMBER`, `STRING`, `NULL`) are returned as they are. Every step
/// consumes its input node and produces a new one.
///
/// Operators are not evaluated implicitly. A `+` node is handled like any
/// other tag, so it only evaluates if the registry has a `+` entry.
///
/// # Examples
///
/// ```
/// use infa_expr::{parse, Evaluator, EvalError, Node};
///
/// let evaluator = Evaluator::new();
///
/// let tree = parse("CONCAT(NULL, 'knowles')", &[]).unwrap();
/// assert_eq!(evaluator.eval(tree).unwrap(), Node::string("knowles"));
///
/// let tree = parse("1 + 2", &[]).unwrap();
/// assert_eq!(
///     evaluator.eval(tree),
///     Err(EvalError::UnknownFunction("+".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r FunctionRegistry,
    max_depth: usize,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Evaluator::with_registry(FunctionRegistry::builtin())
    }
}

impl Evaluator<'static> {
    /// Creates an evaluator over the built-in function registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> Evaluator<'r> {
    pub fn with_registry(registry: &'r FunctionRegistry) -> Self {
        Evaluator {
            registry,
            max_depth: Config::default().max_depth,
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.max_depth = config.max_depth;
        self
    }

    pub fn registry(&self) -> &'r FunctionRegistry {
        self.registry
    }

    /// Reduces `node`, returning the node produced by its function.
    pub fn eval(&self, node: Node) -> Result<Node, EvalError> {
        self.eval_node(node, 1)
    }

    /// Reduces `node` and returns the payload of the resulting leaf.
    pub fn eval_to_string(&self, node: Node) -> Result<String, EvalError> {
        let reduced = self.eval(node)?;
        if !reduced.is_leaf() {
            return Err(EvalError::NotReduced { tag: reduced.tag });
        }

        let tag = reduced.tag.clone();
        reduced.into_value().ok_or(EvalError::NotReduced { tag })
    }

    fn eval_node(&self, node: Node, depth: usize) -> Result<Node, EvalError> {
        if node.is_leaf() {
            return Ok(node);
        }
        if depth > self.max_depth {
            return Err(EvalError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let function = self
            .registry
            .get(&node.tag)
            .ok_or_else(|| EvalError::UnknownFunction(node.tag.clone()))?;

        let Node { tag, args } = node;
        let args = args
            .into_iter()
            .map(|arg| match arg {
                Arg::Node(n) if n.is_leaf() => Ok(n),
                Arg::Node(n) => self.eval_node(n, depth + 1),
                Arg::Value(_) => Err(EvalError::MalformedNode { tag: tag.clone() }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("calling {} with {} argument(s)", tag, args.len());
        function(args)
    }
}
