use super::node::LeafKind;

/// Marks a variable as a parameter that may also be substituted inside
/// string literals.
pub const PARAM_MARKER: char = '$';

/// A named, typed value supplied by the caller and substituted while parsing.
///
/// # Examples
///
/// ```
/// use infa_expr::{LeafKind, Variable};
///
/// let amount = Variable::new("in_AMT", LeafKind::Number, "2");
/// let session = Variable::string("$PMSessionName", "s_load");
///
/// assert!(!amount.is_param());
/// assert!(session.is_param());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub kind: LeafKind,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: LeafKind, value: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    pub fn number(name: impl Into<String>, value: impl Into<String>) -> Self {
        Variable::new(name, LeafKind::Number, value)
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Variable::new(name, LeafKind::String, value)
    }

    pub fn null(name: impl Into<String>) -> Self {
        Variable::new(name, LeafKind::Null, "NULL")
    }

    /// Parameters (`$`-prefixed names) are also replaced inside string literals.
    pub fn is_param(&self) -> bool {
        self.name.starts_with(PARAM_MARKER)
    }
}
