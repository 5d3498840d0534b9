//! Typed cell values

use rust_decimal::Decimal;
use std::fmt;

/// The decoded/encoded form of a cell exchanged with callers
///
/// Whether a value is numeric or text is declared by the variant, never
/// guessed from the string content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypedValue {
    /// No value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Whole number
    Integer(i64),

    /// Exact base-10 number
    Decimal(Decimal),

    /// Text value
    Text(String),
}

impl TypedValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        TypedValue::Text(s.into())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Check if the value is an integer or a decimal
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypedValue::Integer(_) | TypedValue::Decimal(_))
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a decimal (integers widen losslessly)
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            TypedValue::Decimal(d) => Some(*d),
            TypedValue::Integer(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Null => Ok(()),
            TypedValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            TypedValue::Integer(n) => write!(f, "{}", n),
            TypedValue::Decimal(d) => write!(f, "{}", d),
            TypedValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        TypedValue::Integer(n as i64)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Integer(n)
    }
}

impl From<Decimal> for TypedValue {
    fn from(d: Decimal) -> Self {
        TypedValue::Decimal(d)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::text(s)
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Text(s)
    }
}

impl<T: Into<TypedValue>> From<Option<T>> for TypedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TypedValue::Null, Into::into)
    }
}
