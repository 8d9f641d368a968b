use std::{fmt, str::FromStr};

/// Tag of a numeric leaf.
pub const NUMBER: &str = "NUMBER";
/// Tag of a string leaf.
pub const STRING: &str = "STRING";
/// Tag of a null leaf.
pub const NULL: &str = "NULL";

/// The fully-reduced value categories.
///
/// A node tagged with one of these is a leaf: it needs no evaluation and
/// carries exactly one raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Number,
    String,
    Null,
}

impl LeafKind {
    pub fn tag(self) -> &'static str {
        match self {
            LeafKind::Number => NUMBER,
            LeafKind::String => STRING,
            LeafKind::Null => NULL,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            NUMBER => Some(LeafKind::Number),
            STRING => Some(LeafKind::String),
            NULL => Some(LeafKind::Null),
            _ => None,
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value type '{0}' (expected NUMBER, STRING or NULL)")]
pub struct UnknownLeafKind(pub String);

impl FromStr for LeafKind {
    type Err = UnknownLeafKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeafKind::from_tag(&s.to_ascii_uppercase()).ok_or_else(|| UnknownLeafKind(s.to_string()))
    }
}

/// One argument of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Raw payload of a leaf (or of an operator placeholder during parsing)
    Value(String),
    /// Nested sub-expression
    Node(Node),
}

impl From<Node> for Arg {
    fn from(node: Node) -> Self {
        Arg::Node(node)
    }
}

/// A node of the expression tree.
///
/// `tag` is a leaf category (`NUMBER`, `STRING`, `NULL`), an operator symbol
/// (`+`, `<=`, `AND`, ...) or a function name.
///
/// # Examples
///
/// ```
/// use infa_expr::Node;
///
/// let sum = Node::binary("+", Node::number("1.000000"), Node::number("2.000000"));
/// assert_eq!(sum.to_string(), r#"+(NUMBER("1.000000"), NUMBER("2.000000"))"#);
/// assert!(!sum.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: String,
    pub args: Vec<Arg>,
}

impl Node {
    pub fn new(tag: impl Into<String>, args: Vec<Arg>) -> Self {
        Node {
            tag: tag.into(),
            args,
        }
    }

    /// Builds a leaf of the given category.
    ///
    /// `NUMBER` payloads are stored as given; callers are expected to pass
    /// canonical text (see [`crate::numeric::canonicalize`]).
    pub fn leaf(kind: LeafKind, value: impl Into<String>) -> Self {
        Node::new(kind.tag(), vec![Arg::Value(value.into())])
    }

    pub fn number(canonical: impl Into<String>) -> Self {
        Node::leaf(LeafKind::Number, canonical)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::leaf(LeafKind::String, value)
    }

    pub fn null() -> Self {
        Node::leaf(LeafKind::Null, NULL)
    }

    /// Builds a function call node.
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::new(name, args.into_iter().map(Arg::Node).collect())
    }

    /// Builds a binary operator node.
    pub fn binary(operator: impl Into<String>, left: Node, right: Node) -> Self {
        Node::new(operator, vec![Arg::Node(left), Arg::Node(right)])
    }

    /// Transient node standing in for an operator or keyword token until the
    /// fold passes consume it.
    pub(crate) fn placeholder(text: &str) -> Self {
        Node::new(text, vec![Arg::Value(text.to_string())])
    }

    pub fn leaf_kind(&self) -> Option<LeafKind> {
        LeafKind::from_tag(&self.tag)
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf_kind().is_some()
    }

    pub fn is_null(&self) -> bool {
        self.tag == NULL
    }

    /// True for an unfolded operator/keyword token: a non-leaf tag carrying a
    /// single raw payload rather than sub-nodes.
    pub fn is_placeholder(&self) -> bool {
        !self.is_leaf() && matches!(self.args.as_slice(), [Arg::Value(_)])
    }

    /// The payload of a single-valued node (leaves and placeholders).
    pub fn value(&self) -> Option<&str> {
        match self.args.as_slice() {
            [Arg::Value(v)] => Some(v),
            _ => None,
        }
    }

    /// Consumes the node and returns its payload, if it has exactly one.
    pub fn into_value(self) -> Option<String> {
        let mut args = self.args;
        match (args.pop(), args.is_empty()) {
            (Some(Arg::Value(v)), true) => Some(v),
            _ => None,
        }
    }

    /// Nested sub-nodes, skipping raw payloads.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.args.iter().filter_map(|arg| match arg {
            Arg::Node(n) => Some(n),
            Arg::Value(_) => None,
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.tag)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                Arg::Value(v) => write!(f, "{:?}", v)?,
                Arg::Node(n) => write!(f, "{}", n)?,
            }
        }
        f.write_str(")")
    }
}
