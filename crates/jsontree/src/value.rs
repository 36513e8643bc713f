//! The parsed value tree and its canonical text rendering.
//!
//! A tree is built bottom-up by the grammar rules and never changes
//! afterwards. Objects keep their fields in source order and keep duplicate
//! names; lookups return the first match.
//!
//! # Canonical rendering
//!
//! `Display` produces tab-indented text: a newline after every opening
//! bracket, one child per line at depth + 1 tabs, `,` between children, and
//! the closing bracket at the parent's depth. Field names are quoted, string
//! values are written without quotes, so only string-free trees re-parse from
//! their rendering. [`Value::to_json`] gives a fully quoted rendering instead.

use std::fmt;

/// A parsed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Every JSON number, normalized to `f64`.
    Number(f64),
    /// String payload with the surrounding quotes removed. Escape sequences
    /// are kept verbatim.
    String(String),
    /// Fields in source order.
    Object(Vec<Field>),
    Array(Vec<Value>),
}

/// A named member of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Box<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Box::new(value),
        }
    }

    fn write_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "\"{}\": ", self.name)?;
        self.value.write_at(f, depth)
    }
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Field]> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// First field named `name` when this is an object.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_ref())
    }

    /// Render as standard, fully quoted JSON via `serde_json`.
    ///
    /// Duplicate object names collapse to the last occurrence.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }

    fn write_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => f.write_str(s),
            Value::Object(fields) => {
                write_block(f, depth, ('{', '}'), fields.as_slice(), |field, f, d| field.write_at(f, d))
            }
            Value::Array(items) => {
                write_block(f, depth, ('[', ']'), items.as_slice(), |item, f, d| item.write_at(f, d))
            }
        }
    }
}

fn write_block<T>(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    (open, close): (char, char),
    children: &[T],
    write_child: impl Fn(&T, &mut fmt::Formatter<'_>, usize) -> fmt::Result,
) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "{open}{close}");
    }
    writeln!(f, "{open}")?;
    for (i, child) in children.iter().enumerate() {
        write_indent(f, depth + 1)?;
        write_child(child, f, depth + 1)?;
        if i + 1 < children.len() {
            f.write_str(",")?;
        }
        f.write_str("\n")?;
    }
    write_indent(f, depth)?;
    write!(f, "{close}")
}

/// Overflowed literals such as `1e400` parse to infinity; they render as an
/// out-of-range exponent so the lexer reads them back as the same value.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("null")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "1e999" } else { "-1e999" })
    } else {
        write!(f, "{n}")
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_at(f, 0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_at(f, 0)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Object(fields) => {
                let mut map = serde_json::Map::new();
                for field in fields {
                    map.insert(field.name.clone(), field.value.as_ref().into());
                }
                serde_json::Value::Object(map)
            }
            Value::Array(items) => serde_json::Value::Array(items.iter().map(Into::into).collect()),
        }
    }
}

/// Integral values inside the i64 range become JSON integers so `1` does not
/// come back as `1.0`.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return serde_json::Value::Number((n as i64).into());
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
