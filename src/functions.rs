//! Named functions: the parse-time catalog and the evaluation-time registry.
//!
//! The parser only needs to know whether an identifier *is* a function name,
//! which is answered by the full catalog of the transformation language. The
//! evaluator needs an implementation, which comes from a [`FunctionRegistry`].
//! Only a handful of catalog entries have one; the rest parse fine and fail
//! at evaluation time with [`EvalError::UnknownFunction`].

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::{ast::Node, evaluator::EvalError, numeric};

/// Every function name of the transformation language.
pub const FUNCTION_NAMES: &[&str] = &[
    "ABORT",
    "ABS",
    "ADD_TO_DATE",
    "AES_DECRYPT",
    "AES_ENCRYPT",
    "ASCII",
    "AVG",
    "BINARY_COMPARE",
    "BINARY_CONCAT",
    "BINARY_LENGTH",
    "BINARY_SECTION",
    "CEIL",
    "CHOOSE",
    "CHR",
    "CHRCODE",
    "COMPRESS",
    "CONCAT",
    "CONVERT_BASE",
    "COS",
    "COSH",
    "COUNT",
    "CRC32",
    "CUME",
    "DATE_COMPARE",
    "DATE_DIFF",
    "DEC_BASE64",
    "DEC_HEX",
    "DECODE",
    "DECOMPRESS",
    "EBCDIC_ISO88591",
    "ENC_BASE64",
    "ENC_HEX",
    "ERROR",
    "EXP",
    "FIRST",
    "FLOOR",
    "FV",
    "GET_DATE_PART",
    "GREATEST",
    "IIF",
    "IN",
    "INDEXOF",
    "INITCAP",
    "INSTR",
    "ISNULL",
    "IS_DATE",
    "IS_NUMBER",
    "IS_SPACES",
    "LAG",
    "LAST",
    "LAST_DAY",
    "LEAD",
    "LEAST",
    "LENGTH",
    "LN",
    "LOG",
    "LOOKUP",
    "LOWER",
    "LPAD",
    "LTRIM",
    "MAKE_DATE_TIME",
    "MAX",
    "MD5",
    "MEDIAN",
    "METAPHONE",
    "MIN",
    "MOD",
    "MOVINGAVG",
    "MOVINGSUM",
    "NPER",
    "PERCENTILE",
    "PMT",
    "POWER",
    "PV",
    "RAND",
    "RATE",
    "REG_EXTRACT",
    "REG_MATCH",
    "REG_REPLACE",
    "REPLACECHR",
    "REPLACESTR",
    "REVERSE",
    "ROUND",
    "RPAD",
    "RTRIM",
    "SETCOUNTVARIABLE",
    "SET_DATE_PART",
    "SETMAXVARIABLE",
    "SETMINVARIABLE",
    "SETVARIABLE",
    "SHA256",
    "SIGN",
    "SIN",
    "SINH",
    "SOUNDEX",
    "SQRT",
    "STDDEV",
    "SUBSTR",
    "SUM",
    "SYSTIMESTAMP",
    "TAN",
    "TANH",
    "TIME_RANGE",
    "TO_BIGINT",
    "TO_CHAR",
    "TO_DATE",
    "TO_DECIMAL",
    "TO_FLOAT",
    "TO_INTEGER",
    "TRUNC",
    "UPPER",
    "VARIANCE",
];

static CATALOG: Lazy<HashSet<&'static str>> =
    Lazy::new(|| FUNCTION_NAMES.iter().copied().collect());

/// Returns true if `name` is a function of the language. Case-sensitive.
pub fn is_function(name: &str) -> bool {
    CATALOG.contains(name)
}

/// Signature shared by every function implementation: the already-evaluated
/// arguments in call order, consumed, producing the reduced node.
pub type NativeFn = fn(Vec<Node>) -> Result<Node, EvalError>;

static BUILTINS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::with_builtins);

/// Name-keyed table of function implementations.
///
/// The process-wide [`FunctionRegistry::builtin`] table is built on first use
/// and never changes afterwards, so it can be shared freely between threads.
/// Custom registries are ordinary values: build one, then lend it to an
/// [`crate::Evaluator`].
///
/// # Examples
///
/// ```
/// use infa_expr::{functions::FunctionRegistry, parse, Evaluator, EvalError, Node};
///
/// fn upper(args: Vec<Node>) -> Result<Node, EvalError> {
///     let text = args[0].value().unwrap_or_default().to_uppercase();
///     Ok(Node::string(text))
/// }
///
/// let mut registry = FunctionRegistry::with_builtins();
/// registry.register("UPPER", upper);
///
/// let tree = parse("UPPER(CONCAT('ab', 'c'))", &[]).unwrap();
/// let result = Evaluator::with_registry(&registry).eval(tree).unwrap();
/// assert_eq!(result, Node::string("ABC"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, NativeFn>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding the reference implementations.
    pub fn with_builtins() -> Self {
        let mut registry = FunctionRegistry::new();
        registry.register("ABS", abs);
        registry.register("CHR", chr);
        registry.register("CONCAT", concat);
        registry.register("LTRIM", ltrim);
        registry.register("RTRIM", rtrim);
        registry
    }

    /// The shared registry of reference implementations.
    pub fn builtin() -> &'static FunctionRegistry {
        &BUILTINS
    }

    /// Adds or replaces a function, returning the previous implementation.
    pub fn register(&mut self, name: &'static str, function: NativeFn) -> Option<NativeFn> {
        self.functions.insert(name, function)
    }

    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn arity_error(function: &str, expected: impl Into<String>, got: usize) -> EvalError {
    EvalError::Arity {
        function: function.to_string(),
        expected: expected.into(),
        got,
    }
}

fn exactly<const N: usize>(function: &str, args: Vec<Node>) -> Result<[Node; N], EvalError> {
    let got = args.len();
    <[Node; N]>::try_from(args).map_err(|_| arity_error(function, N.to_string(), got))
}

fn payload<'n>(function: &str, node: &'n Node) -> Result<&'n str, EvalError> {
    node.value().ok_or_else(|| EvalError::MissingValue {
        function: function.to_string(),
        tag: node.tag.clone(),
    })
}

fn into_payload(function: &str, node: Node) -> Result<String, EvalError> {
    let tag = node.tag.clone();
    node.into_value().ok_or_else(|| EvalError::MissingValue {
        function: function.to_string(),
        tag,
    })
}

fn number_arg(function: &str, node: &Node) -> Result<f64, EvalError> {
    let text = payload(function, node)?;
    numeric::parse_number(text).ok_or_else(|| EvalError::InvalidNumber {
        function: function.to_string(),
        text: text.to_string(),
    })
}

/// `ABS(n)`: absolute value.
fn abs(args: Vec<Node>) -> Result<Node, EvalError> {
    let [arg] = exactly("ABS", args)?;
    if arg.is_null() {
        return Ok(Node::null());
    }

    let n = number_arg("ABS", &arg)?;
    Ok(Node::number(numeric::format_number(n.abs())))
}

/// `CHR(n)`: the character with code point `n`, truncated toward zero.
fn chr(args: Vec<Node>) -> Result<Node, EvalError> {
    let [arg] = exactly("CHR", args)?;
    if arg.is_null() {
        return Ok(Node::null());
    }

    let code = number_arg("CHR", &arg)?.trunc();
    u32::try_from(code as i64)
        .ok()
        .and_then(char::from_u32)
        .map(|ch| Node::string(ch.to_string()))
        .ok_or_else(|| EvalError::InvalidCodepoint {
            function: "CHR".to_string(),
            value: code as i64,
        })
}

/// `CONCAT(a, b)`: a NULL side yields the other side unchanged.
fn concat(args: Vec<Node>) -> Result<Node, EvalError> {
    let [first, second] = exactly("CONCAT", args)?;

    match (first.is_null(), second.is_null()) {
        (true, true) => Ok(Node::null()),
        (true, false) => Ok(Node::string(into_payload("CONCAT", second)?)),
        (false, true) => Ok(Node::string(into_payload("CONCAT", first)?)),
        (false, false) => {
            let mut text = into_payload("CONCAT", first)?;
            text.push_str(payload("CONCAT", &second)?);
            Ok(Node::string(text))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Leading,
    Trailing,
}

fn ltrim(args: Vec<Node>) -> Result<Node, EvalError> {
    trim("LTRIM", args, Side::Leading)
}

fn rtrim(args: Vec<Node>) -> Result<Node, EvalError> {
    trim("RTRIM", args, Side::Trailing)
}

/// `LTRIM(s [, cutset])` / `RTRIM(s [, cutset])`: strips any character of
/// `cutset` (a single space by default) from one end of `s`.
fn trim(function: &'static str, args: Vec<Node>, side: Side) -> Result<Node, EvalError> {
    let (text, cutset) = match args.as_slice() {
        [text] => (text, None),
        [text, cutset] => (text, Some(cutset)),
        _ => return Err(arity_error(function, "1 or 2", args.len())),
    };

    if text.is_null() || cutset.is_some_and(Node::is_null) {
        return Ok(Node::null());
    }

    let cutset = match cutset {
        Some(node) => payload(function, node)?,
        None => " ",
    };
    let in_cutset = |c: char| cutset.contains(c);
    let text = payload(function, text)?;

    let trimmed = match side {
        Side::Leading => text.trim_start_matches(in_cutset),
        Side::Trailing => text.trim_end_matches(in_cutset),
    };
    Ok(Node::string(trimmed))
}
