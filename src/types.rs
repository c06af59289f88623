//! Column value adapters.
//!
//! [`Json<T>`] stores any serde type as JSON text and decodes SQL NULL as
//! the type's default. [`Time`] is a NULL-tolerant timestamp that maps
//! SQL NULL to `None` in both directions.

use chrono::NaiveDateTime;
use mysql_async::prelude::FromValue;
use mysql_async::{FromValueError, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::qb::Term;

/// JSON column adapter.
///
/// Binds as JSON text; decodes from JSON text, with SQL NULL decoding to
/// `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize> From<Json<T>> for Value {
    fn from(json: Json<T>) -> Value {
        match serde_json::to_string(&json.0) {
            Ok(text) => Value::Bytes(text.into_bytes()),
            Err(err) => {
                // Into<Value> cannot fail; a NULL here surfaces as a
                // server-side error on not-null columns.
                tracing::error!(error = %err, "json value failed to serialize, binding null");
                Value::NULL
            }
        }
    }
}

impl<T: Serialize> From<Json<T>> for Term {
    fn from(json: Json<T>) -> Term {
        Term::Arg(Value::from(json))
    }
}

#[doc(hidden)]
pub struct JsonIr<T>(Json<T>);

impl<T: DeserializeOwned + Default> TryFrom<Value> for JsonIr<T> {
    type Error = FromValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::NULL => Ok(JsonIr(Json(T::default()))),
            Value::Bytes(bytes) => match serde_json::from_slice(&bytes) {
                Ok(inner) => Ok(JsonIr(Json(inner))),
                Err(_) => Err(FromValueError(Value::Bytes(bytes))),
            },
            other => Err(FromValueError(other)),
        }
    }
}

// The driver's tuple FromRow impls require the intermediate to convert
// back into a Value so the row can be restored when a later column fails.
impl<T: Serialize> From<JsonIr<T>> for Value {
    fn from(ir: JsonIr<T>) -> Value {
        Value::from(ir.0)
    }
}

impl<T> From<JsonIr<T>> for Json<T> {
    fn from(ir: JsonIr<T>) -> Self {
        ir.0
    }
}

impl<T: DeserializeOwned + Default> FromValue for Json<T> {
    type Intermediate = JsonIr<T>;
}

/// NULL-tolerant timestamp column adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Time(pub Option<NaiveDateTime>);

impl Time {
    pub fn some(value: NaiveDateTime) -> Self {
        Time(Some(value))
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<NaiveDateTime> for Time {
    fn from(value: NaiveDateTime) -> Self {
        Time(Some(value))
    }
}

impl From<Time> for Value {
    fn from(time: Time) -> Value {
        match time.0 {
            Some(value) => Value::from(value),
            None => Value::NULL,
        }
    }
}

impl From<Time> for Term {
    fn from(time: Time) -> Term {
        Term::Arg(Value::from(time))
    }
}

#[doc(hidden)]
pub struct TimeIr(Time);

impl TryFrom<Value> for TimeIr {
    type Error = FromValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::NULL => Ok(TimeIr(Time(None))),
            other => NaiveDateTime::from_value_opt(other).map(|dt| TimeIr(Time(Some(dt)))),
        }
    }
}

impl From<TimeIr> for Time {
    fn from(ir: TimeIr) -> Self {
        ir.0
    }
}

impl FromValue for Time {
    type Intermediate = TimeIr;
}
