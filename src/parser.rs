//! Builds a single [`Node`] from a token stream.
//!
//! Parsing happens in two stages. A structural pass walks the tokens left to
//! right, resolving parentheses and function calls recursively, substituting
//! variables and turning every operator token into a placeholder node. The
//! resulting flat buffer is then run through the seven fold passes of
//! [`FOLD_PASSES`], each of which combines one precedence level of operator
//! placeholders with their neighbours into binary nodes.
//!
//! There is no precedence table: an operator binds tighter simply because its
//! pass runs earlier, so its node ends up as an operand of later passes.
//!
//! Every buffer entry carries its height, the number of non-leaf levels in its
//! node. Folding a long operator chain nests one level per operator, so the
//! height is checked against the configured limit as each node is built.

use log::{debug, trace};

use crate::{
    ast::{LeafKind, Node, Position, Token, TokenKind, Variable, operators::FOLD_PASSES},
    config::Config,
    functions,
    lexer::{self, LexError},
    numeric,
};

/// Errors that can occur while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Identifier is neither a known function nor a supplied variable
    #[error("the identifier '{name}' was not found (at {position})")]
    UndefinedIdentifier { name: String, position: Position },

    /// Known function name used without an argument list
    #[error("expected '(' after {name} (at {position})")]
    ExpectedParen { name: String, position: Position },

    /// `(` without a matching `)`
    #[error("missing ')' for '(' opened at {position}")]
    UnclosedParen { position: Position },

    /// Operator placeholder with nothing to fold on one side
    #[error("operator '{operator}' is missing its {side} operand")]
    MissingOperand {
        operator: String,
        side: &'static str,
    },

    /// The expression left more or fewer than one top-level node
    #[error("couldn't flatten down to one node (got {count})")]
    NotSingleNode { count: usize },

    /// Parsing stopped before the end of the token stream
    #[error("parsing tokens ended at {end}, but expected {total}: unexpected '{token}' at {position}")]
    TrailingTokens {
        end: usize,
        total: usize,
        token: String,
        position: Position,
    },

    /// Number literal or `NUMBER` variable whose text is not a number
    #[error("'{text}' is not a valid number (at {position})")]
    InvalidNumber { text: String, position: Position },

    /// Groups and calls nested deeper than the configured limit
    #[error("expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

/// The parser for a single formula.
///
/// Holds the token stream and the variables to substitute. Parsing does not
/// consume the parser, so the same instance may be parsed more than once.
///
/// # Examples
///
/// ```
/// use infa_expr::{lexer::tokenize, parser::Parser, Variable};
///
/// let vars = [Variable::number("in_AMT", "2")];
/// let tokens = tokenize("ABS(in_AMT)").unwrap();
/// let node = Parser::new(tokens, &vars).parse().unwrap();
///
/// assert_eq!(node.to_string(), r#"ABS(NUMBER("2.000000"))"#);
/// ```
pub struct Parser<'v> {
    tokens: Vec<Token>,
    vars: &'v [Variable],
    max_depth: usize,
}

/// A node in a parse buffer, with the number of non-leaf levels it spans.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    node: Node,
    height: usize,
}

impl Entry {
    /// Leaves and operator placeholders.
    fn flat(node: Node) -> Self {
        Entry { node, height: 0 }
    }
}

type Buffer = Vec<Entry>;

impl<'v> Parser<'v> {
    pub fn new(tokens: Vec<Token>, vars: &'v [Variable]) -> Self {
        Parser {
            tokens,
            vars,
            max_depth: Config::default().max_depth,
        }
    }

    /// Tokenizes `input` and builds a parser over the result.
    pub fn from_input(input: &str, vars: &'v [Variable]) -> Result<Self, LexError> {
        Ok(Parser::new(lexer::tokenize(input)?, vars))
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.max_depth = config.max_depth;
        self
    }

    /// Parses the whole token stream into exactly one root node.
    pub fn parse(&self) -> Result<Node, ParseError> {
        debug!(
            "parsing {} tokens with {} variables",
            self.tokens.len(),
            self.vars.len()
        );

        let (mut entries, end) = self.parse_expression(0, 0)?;

        if let Some(token) = self.tokens.get(end) {
            return Err(ParseError::TrailingTokens {
                end,
                total: self.tokens.len(),
                token: token.text.clone(),
                position: token.position,
            });
        }

        match (entries.pop(), entries.len()) {
            (Some(root), 0) => Ok(root.node),
            (root, rest) => Err(ParseError::NotSingleNode {
                count: rest + usize::from(root.is_some()),
            }),
        }
    }

    /// Structural pass from `pos`, then every fold pass in order.
    ///
    /// Returns the folded buffer and the position where the structural pass
    /// stopped (a `)` or the end of the stream).
    fn parse_expression(&self, pos: usize, depth: usize) -> Result<(Buffer, usize), ParseError> {
        let (mut buffer, end) = self.structural_pass(pos, depth)?;
        for operators in FOLD_PASSES {
            buffer = fold_pass(buffer, operators, self.max_depth)?;
        }
        Ok((buffer, end))
    }

    fn structural_pass(&self, mut pos: usize, depth: usize) -> Result<(Buffer, usize), ParseError> {
        let mut buffer = Buffer::new();

        while let Some(token) = self.tokens.get(pos) {
            match token.kind {
                TokenKind::Operator if token.text == "," => pos += 1,
                TokenKind::Operator if token.text == ")" => break,
                TokenKind::Operator if token.text == "(" => {
                    let (nodes, next) = self.parse_group(pos, depth)?;
                    buffer.extend(nodes);
                    pos = next;
                }
                TokenKind::Ident if functions::is_function(&token.text) => {
                    let (entry, next) = self.parse_call(pos, depth)?;
                    buffer.push(entry);
                    pos = next;
                }
                TokenKind::Ident | TokenKind::Param => {
                    buffer.push(Entry::flat(self.substitute_variable(token)?));
                    pos += 1;
                }
                TokenKind::Number => {
                    buffer.push(Entry::flat(number_leaf(&token.text, token.position)?));
                    pos += 1;
                }
                TokenKind::String => {
                    let text = self.interpolate_params(&token.text);
                    buffer.push(Entry::flat(Node::string(text)));
                    pos += 1;
                }
                TokenKind::Operator | TokenKind::Keyword => {
                    buffer.push(Entry::flat(Node::placeholder(&token.text)));
                    pos += 1;
                }
            }
        }

        Ok((buffer, pos))
    }

    /// Parses the group opened at `open`. Returns its folded nodes and the
    /// position just past the closing `)`.
    fn parse_group(&self, open: usize, depth: usize) -> Result<(Buffer, usize), ParseError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let (entries, end) = self.parse_expression(open + 1, depth)?;
        match self.tokens.get(end) {
            Some(close) if close.is_operator(")") => Ok((entries, end + 1)),
            _ => Err(ParseError::UnclosedParen {
                position: self.tokens[open].position,
            }),
        }
    }

    fn parse_call(&self, pos: usize, depth: usize) -> Result<(Entry, usize), ParseError> {
        let name = &self.tokens[pos];
        match self.tokens.get(pos + 1) {
            Some(open) if open.is_operator("(") => {
                let (args, next) = self.parse_group(pos + 1, depth)?;
                trace!("call {} with {} argument(s)", name.text, args.len());

                let height = 1 + args.iter().map(|a| a.height).max().unwrap_or(0);
                check_height(height, self.max_depth)?;
                let args = args.into_iter().map(|a| a.node).collect();
                Ok((
                    Entry {
                        node: Node::call(name.text.as_str(), args),
                        height,
                    },
                    next,
                ))
            }
            _ => Err(ParseError::ExpectedParen {
                name: name.text.clone(),
                position: name.position,
            }),
        }
    }

    /// Replaces an identifier with a leaf built from the first variable of
    /// that name.
    fn substitute_variable(&self, token: &Token) -> Result<Node, ParseError> {
        let var = self
            .vars
            .iter()
            .find(|v| v.name == token.text)
            .ok_or_else(|| ParseError::UndefinedIdentifier {
                name: token.text.clone(),
                position: token.position,
            })?;

        match var.kind {
            LeafKind::Number => number_leaf(&var.value, token.position),
            kind => Ok(Node::leaf(kind, var.value.as_str())),
        }
    }

    /// Replaces every parameter name occurring in a string literal with the
    /// parameter's value, one parameter at a time in the order supplied.
    ///
    /// Later parameters see the text produced by earlier replacements.
    fn interpolate_params(&self, text: &str) -> String {
        self.vars
            .iter()
            .filter(|v| v.is_param())
            .fold(text.to_string(), |acc, v| acc.replace(&v.name, &v.value))
    }
}

fn number_leaf(text: &str, position: Position) -> Result<Node, ParseError> {
    numeric::canonicalize(text)
        .map(Node::number)
        .ok_or_else(|| ParseError::InvalidNumber {
            text: text.to_string(),
            position,
        })
}

fn check_height(height: usize, max_depth: usize) -> Result<(), ParseError> {
    if height > max_depth {
        return Err(ParseError::NestingTooDeep { limit: max_depth });
    }
    Ok(())
}

/// One left-to-right fold of the operator placeholders in `operators`.
///
/// Each matching placeholder replaces the most recent output node with a
/// binary node over that node and the next input node, which is consumed.
/// Everything else passes through unchanged. Fails once a folded node is
/// more than `max_depth` levels high.
fn fold_pass(buffer: Buffer, operators: &[&str], max_depth: usize) -> Result<Buffer, ParseError> {
    let mut folded = Buffer::with_capacity(buffer.len());
    let mut input = buffer.into_iter();

    while let Some(Entry { node, height }) = input.next() {
        if !(node.is_placeholder() && operators.contains(&node.tag.as_str())) {
            folded.push(Entry { node, height });
            continue;
        }

        let left = folded.pop().ok_or_else(|| ParseError::MissingOperand {
            operator: node.tag.clone(),
            side: "left",
        })?;
        let right = input.next().ok_or_else(|| ParseError::MissingOperand {
            operator: node.tag.clone(),
            side: "right",
        })?;

        let height = 1 + left.height.max(right.height);
        check_height(height, max_depth)?;

        trace!("fold {} over {} and {}", node.tag, left.node.tag, right.node.tag);
        folded.push(Entry {
            node: Node::binary(node.tag, left.node, right.node),
            height,
        });
    }

    Ok(folded)
}
