//! Bound parameter values.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};

/// A SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Text parameter.
    Text(String),
    /// Floating point parameter.
    Float(f64),
    /// Integer parameter.
    Integer(i64),
    /// Boolean parameter.
    Bool(bool),
    /// Timestamp parameter.
    Timestamp(DateTime<Utc>),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// Creates a text parameter.
    pub fn text(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }

    /// Returns true for values a search record treats as unset.
    ///
    /// Blank means: null, an empty string, numeric zero, or `false`.
    /// Timestamps are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            SqlParam::Text(s) => s.is_empty(),
            SqlParam::Float(f) => *f == 0.0,
            SqlParam::Integer(i) => *i == 0,
            SqlParam::Bool(b) => !b,
            SqlParam::Timestamp(_) => false,
            SqlParam::Null => true,
        }
    }

    /// Converts a scalar JSON value into a parameter.
    ///
    /// Empty arrays and objects map to [`SqlParam::Null`] so they read as
    /// blank; non-empty ones cannot be bound to a single column and are
    /// rejected with the field name.
    pub fn from_json(field: &str, value: &Value) -> ValidationResult<Self> {
        match value {
            Value::Null => Ok(SqlParam::Null),
            Value::Bool(b) => Ok(SqlParam::Bool(*b)),
            Value::String(s) => Ok(SqlParam::Text(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(SqlParam::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(SqlParam::Float(f))
                } else {
                    Err(ValidationError::UnsupportedFieldValue {
                        field: field.to_string(),
                        kind: "out-of-range number".to_string(),
                    })
                }
            }
            Value::Array(items) if items.is_empty() => Ok(SqlParam::Null),
            Value::Object(map) if map.is_empty() => Ok(SqlParam::Null),
            Value::Array(_) => Err(ValidationError::UnsupportedFieldValue {
                field: field.to_string(),
                kind: "array".to_string(),
            }),
            Value::Object(_) => Err(ValidationError::UnsupportedFieldValue {
                field: field.to_string(),
                kind: "object".to_string(),
            }),
        }
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::text(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Integer(i64::from(value))
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Float(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(value: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(value)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlParam::Null)
    }
}
