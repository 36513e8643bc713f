//! Error types for tokenizing and parsing.
//!
//! Only malformed input produces errors. Path lookups report absence with
//! `None` and the binder absorbs coercion failures into default values, so
//! neither of them appears here.

use std::fmt;

use thiserror::Error;

use crate::lexer::TokenKind;

/// No tokenizer rule matched at the current scan offset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character {found:?} at line {line}, column {column} (offset {position})")]
pub struct LexError {
    /// Byte offset into the source text.
    pub position: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// The character no rule could consume.
    pub found: char,
}

/// The grammar rule that rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Document,
    Object,
    Array,
    Field,
    Value,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Document => "document",
            Rule::Object => "object",
            Rule::Array => "array",
            Rule::Field => "field",
            Rule::Value => "value",
        };
        f.write_str(name)
    }
}

/// A grammar rule observed a token kind it cannot accept.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "{rule} rule expected {}, found {found} {text:?} at line {line}, column {column}",
    join_kinds(.expected)
)]
pub struct ParseError {
    pub rule: Rule,
    /// Token kinds the rule would have accepted at this point.
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
    /// Raw text of the offending token (empty for the end-of-input marker).
    pub text: String,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        _ => {
            let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

/// Errors surfaced by [`crate::parse`] and the tokenizer builder.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The source text contains a character sequence no token rule accepts.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// The token stream does not follow the JSON grammar.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A tokenizer rule pattern failed to compile.
    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias used throughout jsontree.
pub type Result<T> = std::result::Result<T, JsonError>;
