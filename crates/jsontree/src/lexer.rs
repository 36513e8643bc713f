//! JSON token taxonomy and rule table.
//!
//! The JSON lexer is one configuration of the generic [`Tokenizer`]: the rule
//! table below, in this exact order, plus a filter that drops `NewLine` and
//! `Space` tokens so the grammar never sees whitespace.
//!
//! String tokens keep their surrounding quotes. A backslash-quote pair is only
//! recognized so that it does not end the string; escapes are never decoded.

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::error::LexError;
use crate::tokenizer::{Kind, Token, Tokenizer};

/// Kinds of JSON tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    NewLine,
    Comma,
    Colon,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Null,
    True,
    False,
    Number,
    String,
    Space,
    End,
}

impl Kind for TokenKind {
    fn end() -> Self {
        TokenKind::End
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::NewLine => "NewLine",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::OpenBracket => "OpenBracket",
            TokenKind::CloseBracket => "CloseBracket",
            TokenKind::Null => "Null",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Space => "Space",
            TokenKind::End => "End",
        };
        f.write_str(name)
    }
}

/// A token produced by the JSON lexer.
pub type JsonToken = Token<TokenKind>;

/// JSON rules as `(kind, pattern)` pairs.
///
/// Order matters: keyword literals precede the catch-all rules, and the first
/// matching rule wins.
pub const JSON_RULES: &[(TokenKind, &str)] = &[
    (TokenKind::NewLine, r"\r\n|\r|\n"),
    (TokenKind::Comma, r","),
    (TokenKind::Colon, r":"),
    (TokenKind::OpenBrace, r"\{"),
    (TokenKind::CloseBrace, r"\}"),
    (TokenKind::OpenBracket, r"\["),
    (TokenKind::CloseBracket, r"\]"),
    (TokenKind::Null, r"null"),
    (TokenKind::True, r"true"),
    (TokenKind::False, r"false"),
    (TokenKind::Number, r"-?[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?"),
    (TokenKind::String, r#""(?:\\"|[^\r\n"])*""#),
    (TokenKind::Space, r"\s+"),
];

/// Build a fresh JSON tokenizer from [`JSON_RULES`].
pub fn json_tokenizer() -> crate::error::Result<Tokenizer<TokenKind>> {
    let mut tokenizer = Tokenizer::new();
    for (kind, pattern) in JSON_RULES {
        tokenizer.add_pattern(*kind, pattern)?;
    }
    Ok(tokenizer.with_filter(is_significant))
}

fn is_significant(token: &JsonToken) -> bool {
    !matches!(token.kind, TokenKind::NewLine | TokenKind::Space)
}

static JSON_TOKENIZER: Lazy<Tokenizer<TokenKind>> =
    Lazy::new(|| json_tokenizer().expect("built-in JSON token rules compile"));

/// Tokenize JSON text, dropping whitespace and newlines.
pub fn tokenize(text: &str) -> Result<Vec<JsonToken>, LexError> {
    let tokens = JSON_TOKENIZER.tokenize(text)?;
    debug!(bytes = text.len(), tokens = tokens.len(), "tokenized");
    Ok(tokens)
}
