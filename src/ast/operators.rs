/// Operators and punctuation, in order of precedence (tightest first).
///
/// Declaration order matters to the lexer: on equal-length matches the
/// earlier entry wins, and `AND`/`OR` are claimed here before the keyword
/// table sees them.
pub const LITERALS: &[&str] = &[
    "(", ")", "+", "-", "NOT", "*", "/", "%", "||", "<", "<=", ">", ">=", "=", "<>", "!=", "^=",
    "AND", "OR", ",",
];

/// The binary operators folded by each precedence pass, in pass order.
///
/// Operators folded earlier bind tighter: they end up nested as operands of
/// the operators folded by later passes. Every pass is left-associative.
pub const FOLD_PASSES: [&[&str]; 7] = [
    &["*", "/", "%"],
    &["+", "-"],
    &["||"],
    &["<", "<=", ">", ">="],
    &["=", "<>", "!=", "^="],
    &["AND"],
    &["OR"],
];

/// Returns true if `text` is an operator or punctuation symbol.
pub fn is_literal(text: &str) -> bool {
    LITERALS.contains(&text)
}
