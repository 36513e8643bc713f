//! # jsontree
//!
//! Parses JSON text into a navigable [`Value`] tree, looks up values by dotted
//! path, and binds trees onto statically shaped records.
//!
//! ## Quick start
//!
//! ```rust
//! use jsontree::{parse, Selection, Value};
//!
//! let tree = parse(r#"{"a":1,"b":[true,false,null],"x":{"y":"z"}}"#).unwrap();
//!
//! // Dotted-path lookup
//! assert_eq!(tree.select("x.y"), Some(Selection::Text("z".to_string())));
//! assert_eq!(tree.select("missing"), None);
//!
//! // Arrays are returned as borrowed elements
//! let items = tree.select("b").unwrap();
//! assert_eq!(items.as_array().unwrap().len(), 3);
//!
//! // Malformed input is a hard error
//! assert!(parse(r#"{"a":1,}"#).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`] — generic ordered-regex tokenizer with a veto filter
//! - [`lexer`] — JSON token kinds and rule table
//! - [`cursor`] — shared read position over the token stream
//! - [`grammar`] — recursive-descent rules (document, object, array, field, value)
//! - [`value`] — the `Value` tree and its canonical rendering
//! - [`select`] — dotted-path lookups
//! - [`bind`] — typed record binding (`Bind`, `Coerce`, [`record!`])
//! - [`error`] — lex and parse errors

pub mod bind;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod select;
pub mod tokenizer;
pub mod value;

pub use bind::{bind, Bind, Coerce, Coerced, Record};
pub use cursor::Cursor;
pub use error::{JsonError, LexError, ParseError, Result, Rule};
pub use lexer::{tokenize, JsonToken, TokenKind};
pub use select::{select, Selection};
pub use tokenizer::{Token, Tokenizer};
pub use value::{Field, Value};

use tracing::debug;

/// Parse a JSON document into a [`Value`] tree.
///
/// The root must be an object or an array. The first lexical or grammatical
/// problem aborts the parse; no partial tree is returned.
pub fn parse(text: &str) -> Result<Value> {
    let tokens = tokenize(text)?;
    let mut cursor = Cursor::new(&tokens)?;
    let value = grammar::document(&mut cursor)?;
    debug!(bytes = text.len(), tokens = tokens.len(), root = value.kind(), "parsed");
    Ok(value)
}
