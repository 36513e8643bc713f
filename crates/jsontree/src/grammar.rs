//! Recursive-descent JSON grammar.
//!
//! Each rule is a function of one shared [`Cursor`]. A rule starts with the
//! cursor on the first token of its construct and returns with the cursor on
//! the first token after it. There is no backtracking and no recovery: the
//! first unexpected token aborts the whole parse.
//!
//! ```text
//! document := object | array            (then End)
//! object   := '{' field (',' field)* '}'
//! array    := '[' ( ']' | value (',' ( ']' | value ))* ']' )
//! field    := String ':' value
//! value    := String | Number | true | false | null | object | array
//! ```
//!
//! Two behaviors follow directly from these rules and are kept on purpose:
//! an object always attempts at least one field, so `{}` is rejected by the
//! field rule; and an array checks for `]` at the top of every iteration, so
//! a trailing comma before `]` is accepted.

use crate::cursor::Cursor;
use crate::error::{ParseError, Rule};
use crate::lexer::TokenKind;
use crate::value::{Field, Value};

const VALUE_START: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::OpenBrace,
    TokenKind::OpenBracket,
];

/// Parse a whole document: one object or array followed by end of input.
pub fn document(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    let value = match cursor.kind() {
        TokenKind::OpenBrace => object(cursor)?,
        TokenKind::OpenBracket => array(cursor)?,
        _ => {
            return Err(cursor.unexpected(
                Rule::Document,
                &[TokenKind::OpenBrace, TokenKind::OpenBracket],
            ))
        }
    };

    if !cursor.current().is_last {
        // Trailing content after the root value.
        return Err(cursor.unexpected(Rule::Document, &[TokenKind::End]));
    }
    Ok(value)
}

/// Parse `{ field, ... }`.
pub fn object(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cursor.expect(Rule::Object, TokenKind::OpenBrace)?;

    let mut fields = Vec::new();
    loop {
        fields.push(field(cursor)?);
        match cursor.kind() {
            TokenKind::Comma => {
                cursor.advance();
            }
            TokenKind::CloseBrace => {
                cursor.advance();
                break;
            }
            _ => {
                return Err(cursor.unexpected(
                    Rule::Object,
                    &[TokenKind::Comma, TokenKind::CloseBrace],
                ))
            }
        }
    }
    Ok(Value::Object(fields))
}

/// Parse `[ value, ... ]`, including the empty array.
pub fn array(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cursor.expect(Rule::Array, TokenKind::OpenBracket)?;

    let mut items = Vec::new();
    loop {
        if cursor.kind() == TokenKind::CloseBracket {
            cursor.advance();
            break;
        }
        items.push(value(cursor)?);
        match cursor.kind() {
            TokenKind::Comma => {
                cursor.advance();
            }
            TokenKind::CloseBracket => {
                cursor.advance();
                break;
            }
            _ => {
                return Err(cursor.unexpected(
                    Rule::Array,
                    &[TokenKind::Comma, TokenKind::CloseBracket],
                ))
            }
        }
    }
    Ok(Value::Array(items))
}

/// Parse `"name": value`. The name has its quotes trimmed.
pub fn field(cursor: &mut Cursor<'_>) -> Result<Field, ParseError> {
    let name = cursor.expect(Rule::Field, TokenKind::String)?;
    cursor.expect(Rule::Field, TokenKind::Colon)?;
    let value = value(cursor)?;
    Ok(Field::new(trim_quotes(&name.text), value))
}

/// Parse any value, delegating to [`object`] and [`array`] for containers.
pub fn value(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    let token = cursor.current();
    let value = match token.kind {
        TokenKind::OpenBrace => return object(cursor),
        TokenKind::OpenBracket => return array(cursor),
        TokenKind::String => Value::String(trim_quotes(&token.text).to_string()),
        // The number rule only admits text f64 accepts, so the fallback is
        // never expected to fire.
        TokenKind::Number => Value::Number(token.text.parse().unwrap_or(0.0)),
        TokenKind::True => Value::Bool(true),
        TokenKind::False => Value::Bool(false),
        TokenKind::Null => Value::Null,
        _ => return Err(cursor.unexpected(Rule::Value, VALUE_START)),
    };
    cursor.advance();
    Ok(value)
}

fn trim_quotes(text: &str) -> &str {
    text.trim_matches('"')
}
