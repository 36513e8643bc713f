//! Typed record binding.
//!
//! The binder projects a [`Value`] tree onto a statically shaped record. The
//! destination type alone decides which paths are looked up: every field of
//! the record builds its path by appending its JSON key to the parent path,
//! scalars are fetched with [`select`](crate::select::select) and coerced, and
//! nested records recurse with the extended path. JSON members the record does
//! not name are ignored.
//!
//! Binding is total. A missing path, an array where a scalar was expected, or
//! text that does not parse as the field's type all leave that field at its
//! `Default` value. Coercion reports this explicitly through [`Coerced`],
//! which is separate from the hard [`JsonError`](crate::JsonError) of parsing.
//!
//! Records are declared with the [`record!`](crate::record) macro, which
//! derives `Default` and generates the [`Bind`] and [`Record`] impls at
//! compile time.
//!
//! ```
//! use jsontree::{parse, record};
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Server {
//!         pub host: String,
//!         pub port: u16,
//!         pub tags: Vec<String>,
//!         pub limits: Limits => "Limits",
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Limits {
//!         pub max_conn: u32 => "maxConn",
//!     }
//! }
//!
//! let tree = parse(r#"{"host":"db","port":5432,"tags":["a","b"],"Limits":{"maxConn":8}}"#).unwrap();
//! let server: Server = tree.bind();
//! assert_eq!(server.host, "db");
//! assert_eq!(server.port, 5432);
//! assert_eq!(server.tags, vec!["a", "b"]);
//! assert_eq!(server.limits.max_conn, 8);
//! ```

use std::any::type_name;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::trace;

use crate::select::{select, Selection};
use crate::value::Value;

/// Outcome of a permissive coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced<T> {
    /// The text parsed as the target type.
    Parsed(T),
    /// The text did not parse; the caller falls back to the default.
    Defaulted,
}

impl<T: Default> Coerced<T> {
    /// The parsed value, or `T::default()`.
    pub fn value(self) -> T {
        match self {
            Coerced::Parsed(value) => value,
            Coerced::Defaulted => T::default(),
        }
    }
}

impl<T> Coerced<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Coerced::Parsed(_))
    }
}

impl<T> From<Option<T>> for Coerced<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Coerced::Defaulted, Coerced::Parsed)
    }
}

/// Permissive text-to-scalar conversion used for leaf fields.
pub trait Coerce: Sized + Default {
    fn coerce(text: &str) -> Coerced<Self>;
}

impl Coerce for bool {
    fn coerce(text: &str) -> Coerced<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Coerced::Parsed(true)
        } else if text.eq_ignore_ascii_case("false") {
            Coerced::Parsed(false)
        } else {
            Coerced::Defaulted
        }
    }
}

impl Coerce for String {
    fn coerce(text: &str) -> Coerced<Self> {
        Coerced::Parsed(text.to_string())
    }
}

macro_rules! coerce_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Coerce for $ty {
                fn coerce(text: &str) -> Coerced<Self> {
                    text.trim().parse::<$ty>().ok().into()
                }
            }
        )*
    };
}

coerce_via_from_str!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, Decimal,
);

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_naive_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

impl Coerce for NaiveDateTime {
    fn coerce(text: &str) -> Coerced<Self> {
        parse_naive_date_time(text.trim()).into()
    }
}

impl Coerce for NaiveDate {
    fn coerce(text: &str) -> Coerced<Self> {
        let text = text.trim();
        parse_date(text)
            .or_else(|| parse_naive_date_time(text).map(|dt| dt.date()))
            .into()
    }
}

impl Coerce for DateTime<Utc> {
    fn coerce(text: &str) -> Coerced<Self> {
        parse_naive_date_time(text.trim())
            .map(|dt| dt.and_utc())
            .into()
    }
}

/// A type that can be populated from a value tree at a path.
pub trait Bind: Sized {
    /// Build `Self` from whatever `tree` holds at `path`. Never fails.
    fn bind_at(tree: &Value, path: &str) -> Self;
}

/// A record declared with [`record!`](crate::record).
pub trait Record: Bind + Default {
    /// JSON keys of the record's fields, in declaration order.
    const FIELDS: &'static [&'static str];
}

/// Bind a whole tree to `T`, starting from the root path.
pub fn bind<T: Bind>(tree: &Value) -> T {
    T::bind_at(tree, "")
}

impl Value {
    /// Bind this tree to `T`. See [`bind`].
    pub fn bind<T: Bind>(&self) -> T {
        bind(self)
    }
}

/// Path of a child member: `parent.key`, or just `key` at the root.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn bind_scalar<T: Coerce>(tree: &Value, path: &str) -> T {
    match select(tree, path) {
        Some(Selection::Text(text)) => {
            let coerced = T::coerce(&text);
            if !coerced.is_parsed() {
                trace!(path, text = %text, ty = type_name::<T>(), "coercion fell back to default");
            }
            coerced.value()
        }
        Some(Selection::Array(_)) => {
            trace!(path, ty = type_name::<T>(), "array selected for scalar field");
            T::default()
        }
        None => T::default(),
    }
}

macro_rules! bind_scalars {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bind for $ty {
                fn bind_at(tree: &Value, path: &str) -> Self {
                    bind_scalar(tree, path)
                }
            }
        )*
    };
}

bind_scalars!(
    bool,
    String,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    Decimal,
    NaiveDateTime,
    NaiveDate,
    DateTime<Utc>,
);

/// Sequences of scalars. Each array element is rendered to text and coerced
/// on its own; anything other than an array yields an empty `Vec`.
impl<T: Coerce> Bind for Vec<T> {
    fn bind_at(tree: &Value, path: &str) -> Self {
        match select(tree, path) {
            Some(Selection::Array(items)) => items
                .iter()
                .map(|item| T::coerce(&item.to_string()).value())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Declare a bindable record.
///
/// Expands to the struct itself with `#[derive(Default)]` added, plus
/// [`Bind`] and [`Record`] impls. A field binds to the JSON key named after it
/// unless a key is given with `=> "key"`. Field types must implement [`Bind`]
/// and `Default`: scalars, `Vec` of scalars, or other records.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::bind::Bind for $name {
            fn bind_at(tree: &$crate::Value, path: &str) -> Self {
                Self {
                    $(
                        $field: <$ty as $crate::bind::Bind>::bind_at(
                            tree,
                            &$crate::bind::child_path(path, $crate::__record_key!($field $(, $key)?)),
                        ),
                    )*
                }
            }
        }

        impl $crate::bind::Record for $name {
            const FIELDS: &'static [&'static str] = &[$($crate::__record_key!($field $(, $key)?)),*];
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}
