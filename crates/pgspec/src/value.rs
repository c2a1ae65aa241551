//! Scalar values carried by specification nodes.
//!
//! A [`Value`] is a closed sum over the scalar kinds the Postgres execution
//! layer accepts. It implements [`ToSql`] by delegating to the wrapped
//! scalar, so an argument list of `Value`s can be bound positionally by
//! tokio-postgres without any per-call conversion.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// A scalar value attached to a comparison or membership condition.
///
/// # Example
/// ```
/// use pgspec::Value;
///
/// let v: Value = "alice".into();
/// assert_eq!(v, Value::Text("alice".to_string()));
///
/// let n: Value = Option::<i64>::None.into();
/// assert_eq!(n, Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 text (`text` / `varchar`).
    Text(String),
    /// 64-bit signed integer (`bigint`; also binds to `int`/`smallint` columns via Postgres coercion of the literal).
    Int(i64),
    /// 64-bit float (`double precision`).
    Float(f64),
    /// Boolean (`boolean`).
    Bool(bool),
    /// UTC timestamp (`timestamptz`).
    Timestamp(DateTime<Utc>),
    /// UUID (`uuid`).
    Uuid(Uuid),
    /// Arbitrary JSON document (`json` / `jsonb`).
    Json(serde_json::Value),
    /// SQL NULL.
    Null,
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Text(v) => v.to_sql(ty, out),
            Value::Int(v) => v.to_sql(ty, out),
            Value::Float(v) => v.to_sql(ty, out),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
            Value::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // Which variant applies is only known per value; the delegated
        // encode rejects genuinely incompatible column types at bind time.
        true
    }

    to_sql_checked!();
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
