use std::fmt;
use std::sync::Arc;

use crate::data_type::DataType;
use crate::error::{DbError, DbResult};

/// Represents a single data value stored in the database.
///
/// This enum wraps the supported Rust types into a single type that can be
/// passed around the engine. Equality compares within the same variant only;
/// an integer never equals a text value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value.
    Int(i64),
    /// A UTF-8 string value, wrapped in an [Arc] for efficient,
    /// thread-safe sharing and cheap cloning.
    Text(Arc<str>),
}

impl Value {
    /// Returns the inner integer value if this is a [Value::Int].
    /// Otherwise, returns `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a reference to the inner string slice if this is a [Value::Text].
    /// Otherwise, returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the logical [DataType] corresponding to this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Text(_) => DataType::Text,
        }
    }

    /// Converts a raw literal token into a typed [Value] using the declared
    /// type of the column it targets.
    ///
    /// - For [DataType::Int], every character that is not a decimal digit or
    ///   `-` is stripped before parsing, so a quoted literal like `'42'`
    ///   still coerces to `42`.
    /// - For [DataType::Text], a leading and a trailing single quote are
    ///   dropped when present; the rest of the literal is kept verbatim, with
    ///   no escape processing.
    ///
    /// # Errors
    /// Returns an error if an integer literal contains no digits at all, or
    /// if the stripped remainder is not a valid signed integer.
    ///
    /// # Example
    /// ```
    /// # use minisql::{DataType, Value};
    /// assert_eq!(Value::coerce("42", DataType::Int).unwrap(), Value::Int(42));
    /// assert_eq!(
    ///     Value::coerce("'Alice'", DataType::Text).unwrap(),
    ///     Value::Text("Alice".into())
    /// );
    /// ```
    pub fn coerce(literal: &str, target: DataType) -> DbResult<Self> {
        match target {
            DataType::Int => {
                let digits: String = literal
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '-')
                    .collect();
                if digits.is_empty() {
                    return Err(DbError::Value(format!(
                        "{literal:?} contains no digits to read as an integer"
                    )));
                }
                digits
                    .parse::<i64>()
                    .map(Self::Int)
                    .map_err(|_| DbError::Value(format!("{literal:?} is not a valid integer")))
            }
            DataType::Text => {
                let mut text = literal;
                if let Some(rest) = text.strip_prefix('\'') {
                    text = rest;
                }
                if let Some(rest) = text.strip_suffix('\'') {
                    text = rest;
                }
                Ok(Self::Text(text.into()))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
