mod opaque;
pub use opaque::Opaque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use url::Url;

/// A typed attribute value held by an entity instance.
///
/// There is no null variant: an unset attribute is represented by the
/// absence of a value (`Option::None`), never by a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Binary blob
    Bytes(Vec<u8>),

    /// Point in time, normalized to millisecond precision
    Date(DateTime<Utc>),

    /// Exact decimal number
    Decimal(Decimal),

    /// Single precision float
    F32(f32),

    /// Double precision float
    F64(f64),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Ordered list, stored as received
    List(Vec<serde_json::Value>),

    /// Keyed map, stored as received
    Map(serde_json::Map<String, serde_json::Value>),

    /// Value produced by a registered converter
    Opaque(Opaque),

    /// String value
    String(String),

    /// Absolute URL
    Url(Url),
}

impl Value {
    /// Short name of the value's variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "binary",
            Self::Date(_) => "date",
            Self::Decimal(_) => "decimal",
            Self::F32(_) => "float",
            Self::F64(_) => "double",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Opaque(_) => "transformable",
            Self::String(_) => "string",
            Self::Url(_) => "url",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is any of the integer variants.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Self::Decimal(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(v) => Some(v),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Date(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::List(v) => write!(f, "<list of {}>", v.len()),
            Self::Map(v) => write!(f, "<map of {}>", v.len()),
            Self::Opaque(v) => write!(f, "<{}>", v.repr()),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Url(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i16> for Value {
    fn from(src: i16) -> Self {
        Self::I16(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f32> for Value {
    fn from(src: f32) -> Self {
        Self::F32(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Decimal> for Value {
    fn from(src: Decimal) -> Self {
        Self::Decimal(src)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Date(src)
    }
}

impl From<Url> for Value {
    fn from(src: Url) -> Self {
        Self::Url(src)
    }
}

impl From<Opaque> for Value {
    fn from(src: Opaque) -> Self {
        Self::Opaque(src)
    }
}
