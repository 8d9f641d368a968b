//! # Expression Language - Abstract Syntax Tree
//!
//! This module defines the data model shared by every stage of the
//! interpreter: the tokens produced by the lexer, the single [`Node`] type
//! the parser builds and the evaluator reduces, and the caller-supplied
//! [`Variable`]s that are substituted while parsing.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens, token kinds, source positions and the keyword table
//! - **[operators]** - Literal operator table and the precedence fold passes
//! - **[node]** - The AST node, its arguments and the leaf categories
//! - **[variable]** - Typed variables supplied by the caller
//!
//! ## Tree Shape
//!
//! ```text
//! ABS(in_AMT) + 1 * 2
//! ```
//!
//! with `in_AMT` a `NUMBER` variable holding `"-3"` parses to
//!
//! ```text
//! +(ABS(NUMBER("-3.000000")), *(NUMBER("1.000000"), NUMBER("2.000000")))
//! ```
//!
//! Leaves (`NUMBER`, `STRING`, `NULL`) always hold exactly one raw string.
//! Every other node holds sub-nodes: operators hold two, function calls hold
//! however many arguments were written.
pub mod node;
pub mod operators;
pub mod tokens;
pub mod variable;

pub use node::{Arg, LeafKind, Node};
pub use tokens::{Position, Token, TokenKind};
pub use variable::Variable;
