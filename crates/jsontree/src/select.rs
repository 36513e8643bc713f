//! Dotted-path lookups.
//!
//! A path such as `"glossary.GlossDiv.title"` is consumed one segment per
//! object hop. Field nodes are transparent: reaching a field re-applies the
//! same remaining path to its value. Names match exactly and the first field
//! with a matching name wins. There is no index syntax, so arrays are only
//! reachable as the final step of a path.
//!
//! Absence is not an error; [`select`] returns `None`.

use tracing::trace;

use crate::value::{Field, Value};

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    /// Canonical text of the selected node.
    Text(String),
    /// The elements of a selected array, borrowed from the tree.
    Array(&'a [Value]),
}

impl<'a> Selection<'a> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Selection::Text(text) => Some(text),
            Selection::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a [Value]> {
        match self {
            Selection::Text(_) => None,
            Selection::Array(items) => Some(items),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Selection::Text(text) => Some(text),
            Selection::Array(_) => None,
        }
    }
}

/// A node reached during traversal: either a value or an object member.
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Value(&'a Value),
    Field(&'a Field),
}

/// Look up `path` in `tree`.
pub fn select<'a>(tree: &'a Value, path: &str) -> Option<Selection<'a>> {
    let found = select_node(Node::Value(tree), path);
    if found.is_none() {
        trace!(path, "path not found");
    }
    found
}

fn select_node<'a>(node: Node<'a>, path: &str) -> Option<Selection<'a>> {
    if path.is_empty() {
        return Some(match node {
            Node::Field(field) => match field.value.as_ref() {
                Value::Array(items) => Selection::Array(items),
                value => Selection::Text(value.to_string()),
            },
            Node::Value(value) => Selection::Text(value.to_string()),
        });
    }

    let (name, rest) = path.split_once('.').unwrap_or((path, ""));

    match node {
        // Path not exhausted, but a string ends the walk as a match.
        Node::Value(Value::String(s)) => Some(Selection::Text(s.clone())),
        Node::Field(field) => select_node(Node::Value(&field.value), path),
        Node::Value(Value::Object(fields)) => fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| select_node(Node::Field(field), rest)),
        Node::Value(_) => None,
    }
}

impl Value {
    /// Look up a dotted path. See [`select`].
    pub fn select(&self, path: &str) -> Option<Selection<'_>> {
        select(self, path)
    }
}
