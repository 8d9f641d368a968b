//! Turns formula text into a stream of [`Token`]s.
//!
//! The lexer is table driven: every rule is an anchored regular expression and
//! at each offset the rule with the longest match wins. Ties go to the rule
//! declared first, which is why multi-character operators such as `<=` are
//! listed before their one-character prefixes and keywords before the
//! general identifier pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Position, Token, TokenKind, operators::LITERALS, tokens::KEYWORDS};

/// Errors that can occur while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No rule matches the input at this position
    #[error("unexpected input at {position}: '{snippet}'")]
    UnconsumedInput { position: Position, snippet: String },

    /// A string literal has no closing quote
    #[error("unclosed string starting at {position}")]
    UnterminatedString { position: Position },
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Emit(TokenKind),
    Skip,
    StringLiteral,
}

struct Rule {
    regex: Regex,
    action: Action,
}

impl Rule {
    fn new(pattern: &str, action: Action) -> Self {
        let regex = Regex::new(&format!("^(?:{})", pattern)).expect("lexer patterns are static");
        Rule { regex, action }
    }
}

// Order is significant: see the module docs.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = Vec::new();
    for lit in LITERALS {
        rules.push(Rule::new(&regex::escape(lit), Action::Emit(TokenKind::Operator)));
    }
    for name in KEYWORDS {
        rules.push(Rule::new(&regex::escape(name), Action::Emit(TokenKind::Keyword)));
    }
    rules.push(Rule::new(r"(--|//)[^\n]*\n?", Action::Skip));
    rules.push(Rule::new(r"\$+[A-Za-z0-9_\-]+", Action::Emit(TokenKind::Param)));
    rules.push(Rule::new("'", Action::StringLiteral));
    rules.push(Rule::new(r"-?[0-9]+(\.[0-9]+)?", Action::Emit(TokenKind::Number)));
    rules.push(Rule::new(r"[A-Za-z0-9_]+", Action::Emit(TokenKind::Ident)));
    rules.push(Rule::new(r"[ \t\n\r]+", Action::Skip));
    rules
});

const SNIPPET_CHARS: usize = 10;

/// Scanner over formula text.
///
/// Whitespace and comments are consumed silently. The scanner is not
/// restartable: once it reports an error it yields nothing further.
pub struct Lexer<'a> {
    input: &'a str,
    position: Position,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
            failed: false,
        }
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.input[self.position.offset..self.position.offset + len];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.position.offset += len;
    }

    /// Finds the rule with the longest match at the current offset.
    fn longest_match(rest: &str) -> Option<(&'static Rule, usize)> {
        let mut best: Option<(&'static Rule, usize)> = None;
        for rule in RULES.iter() {
            if let Some(m) = rule.regex.find(rest) {
                let len = m.end();
                if len > 0 && best.is_none_or(|(_, best_len)| len > best_len) {
                    best = Some((rule, len));
                }
            }
        }
        best
    }

    /// Returns the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.failed {
            return Ok(None);
        }

        loop {
            let rest = &self.input[self.position.offset..];
            if rest.is_empty() {
                return Ok(None);
            }

            let start = self.position;
            let Some((rule, len)) = Self::longest_match(rest) else {
                self.failed = true;
                return Err(LexError::UnconsumedInput {
                    position: start,
                    snippet: rest.chars().take(SNIPPET_CHARS).collect(),
                });
            };

            match rule.action {
                Action::Skip => self.advance(len),
                Action::Emit(kind) => {
                    let text = &rest[..len];
                    self.advance(len);
                    return Ok(Some(Token::new(kind, text, start)));
                }
                Action::StringLiteral => {
                    let Some(close) = rest[1..].find('\'') else {
                        self.failed = true;
                        return Err(LexError::UnterminatedString { position: start });
                    };
                    let text = &rest[1..1 + close];
                    self.advance(close + 2);
                    return Ok(Some(Token::new(TokenKind::String, text, start)));
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenizes the whole input, failing on the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}
