//! Value terms used by the statement builders.
//!
//! A [`Term`] decides how a value reaches the final SQL: as a `?`
//! placeholder with a bound argument, as inline SQL text, or as the
//! `default` keyword. Most builder methods accept `impl Into<Term>`, and
//! plain Rust values convert to bound arguments.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mysql_async::Value;

/// How a value is rendered into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Rendered as `?` with the value appended to the argument list.
    Arg(Value),
    /// Rendered verbatim as SQL text.
    Raw(String),
    /// Rendered as the bare `default` keyword (insert values).
    Default,
}

/// Mark a value as a bound argument.
///
/// Idempotent on arguments and `Default`; promotes a raw term to an
/// argument holding its text.
pub fn arg(value: impl Into<Term>) -> Term {
    match value.into() {
        Term::Raw(text) => Term::Arg(Value::Bytes(text.into_bytes())),
        term => term,
    }
}

/// Mark a value as inline SQL text instead of a bound argument.
///
/// Idempotent on raw terms and `Default`; demotes an argument to the
/// inline rendering of its value.
pub fn not_arg(value: impl Into<Term>) -> Term {
    match value.into() {
        Term::Arg(v) => Term::Raw(inline_text(&v)),
        term => term,
    }
}

/// Create a raw SQL text term.
pub fn raw(text: impl Into<String>) -> Term {
    Term::Raw(text.into())
}

// Inline rendering for demoted arguments. Strings render bare, matching
// how raw terms are written by hand ("now()", column names).
fn inline_text(value: &Value) -> String {
    match value {
        Value::NULL => "null".to_owned(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        other => other.as_sql(true),
    }
}

macro_rules! term_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Term {
            fn from(value: $ty) -> Self {
                Term::Arg(Value::from(value))
            }
        }
    )*};
}

term_from_value!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, Vec<u8>,
    NaiveDate, NaiveTime, NaiveDateTime,
);

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Arg(Value::from(value))
    }
}

impl From<&[u8]> for Term {
    fn from(value: &[u8]) -> Self {
        Term::Arg(Value::from(value))
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Arg(value)
    }
}

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Term::Arg(Value::NULL),
        }
    }
}

/// Build a row of terms for insert values and multi-column assignments.
///
/// # Example
///
/// ```ignore
/// use mysqlkit::{qb::{arg, not_arg}, row};
///
/// let terms = row!["alice", "Alice", not_arg("now()")];
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        [$($crate::qb::Term::from($value)),*]
    };
}
