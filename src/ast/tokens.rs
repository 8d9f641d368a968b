use std::fmt;

/// Reserved words recognised by the lexer, in declaration order.
///
/// Apart from `NULL` none of these carry meaning for the evaluator; they are
/// tokenised so formulas using them still parse.
pub const KEYWORDS: &[&str] = &[
    ":EXT",
    ":INFA",
    ":LKP",
    ":MCR",
    ":SD",
    ":SEQ",
    ":SP",
    ":TD",
    "AND",
    "DD_DELETE",
    "DD_INSERT",
    "DD_REJECT",
    "DD_UPDATE",
    "FALSE",
    "NOT",
    "NULL",
    "OR",
    "PROC_RESULT",
    "SESSTARTTIME",
    "SPOUTPUT",
    "SYSDATE",
    "TRUE",
    // workflow expressions
    "WORKFLOWSTARTTIME",
    "ABORTED",
    "DISABLED",
    "FAILED",
    "NOTSTARTED",
    "STARTED",
    "STOPPED",
    "SUCCEEDED",
];

/// Returns true if `text` is a reserved word.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// Location of a token in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with the
/// column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The class a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Operator or punctuation from the literal table
    ///
    /// # Examples
    /// ```text
    /// (  )  +  <=  ||  ,
    /// ```
    Operator,

    /// Reserved word from [`KEYWORDS`]
    ///
    /// # Examples
    /// ```text
    /// NULL
    /// DD_INSERT
    /// :LKP
    /// ```
    Keyword,

    /// Parameter or mapping variable, prefixed with one or more `$`
    ///
    /// # Examples
    /// ```text
    /// $PMSessionName
    /// $$LoadDate
    /// ```
    Param,

    /// Single-quoted string literal. The token text excludes the quotes.
    String,

    /// Number literal, optionally signed, optional fractional part
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.1
    /// ```
    Number,

    /// Function name or port/variable identifier
    Ident,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Operator => "OPERATOR",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Param => "PARAM",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "IDENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A lexical token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The token's type name.
    ///
    /// Operators and keywords are their own type (`"+"`, `"NULL"`); the four
    /// general classes use their class name (`"IDENT"`, `"NUMBER"`, ...).
    pub fn type_name(&self) -> &str {
        match self.kind {
            TokenKind::Operator | TokenKind::Keyword => &self.text,
            kind => kind.name(),
        }
    }

    /// Returns true if this is the given operator or punctuation token.
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "'{}'", self.text),
            _ => f.write_str(&self.text),
        }
    }
}
