//! Shared read position over a token stream.

use crate::error::{ParseError, Rule};
use crate::lexer::{JsonToken, TokenKind};

/// Mutable position over one parse's tokens.
///
/// All grammar rules take the same `&mut Cursor`. It only moves forward, and
/// once it reaches the end-of-stream token further advances are no-ops.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [JsonToken],
    index: usize,
}

impl<'t> Cursor<'t> {
    /// Position a cursor on the first token.
    ///
    /// The slice must end with the end-of-stream token produced by the
    /// tokenizer; anything else is rejected as a document-level parse error.
    pub fn new(tokens: &'t [JsonToken]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.is_last => Ok(Self { tokens, index: 0 }),
            last => Err(ParseError {
                rule: Rule::Document,
                expected: vec![TokenKind::End],
                found: last.map_or(TokenKind::End, |t| t.kind),
                text: last.map(|t| t.text.clone()).unwrap_or_default(),
                position: last.map_or(0, |t| t.position + t.text.len()),
                line: last.map_or(1, |t| t.line),
                column: last.map_or(1, |t| t.column),
            }),
        }
    }

    /// Token at the current position.
    pub fn current(&self) -> &'t JsonToken {
        &self.tokens[self.index]
    }

    /// Move to the next token and return it.
    pub fn advance(&mut self) -> &'t JsonToken {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Index of the current token.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Kind of the current token.
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Build an error describing the current token as unexpected.
    pub(crate) fn unexpected(&self, rule: Rule, expected: &[TokenKind]) -> ParseError {
        let token = self.current();
        ParseError {
            rule,
            expected: expected.to_vec(),
            found: token.kind,
            text: token.text.clone(),
            position: token.position,
            line: token.line,
            column: token.column,
        }
    }

    /// Require the current token to be `kind`, then step past it.
    pub(crate) fn expect(&mut self, rule: Rule, kind: TokenKind) -> Result<&'t JsonToken, ParseError> {
        let token = self.current();
        if token.kind != kind {
            return Err(self.unexpected(rule, &[kind]));
        }
        self.advance();
        Ok(token)
    }
}
