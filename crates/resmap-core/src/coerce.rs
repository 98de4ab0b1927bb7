//! Bidirectional conversion between wire values and typed attribute values.
//!
//! Each attribute kind has a pair of pure functions in one of the submodules.
//! [`decode`] and [`encode`] dispatch on the attribute's kind and treat a
//! null or missing wire value as "absent".

pub mod binary;
pub mod boolean;
pub mod date;
pub mod decimal;
pub mod number;
pub mod structured;
pub mod text;

mod converter;
pub use converter::{Converter, Converters};

use crate::schema::{Attribute, AttributeKind};
use crate::{Error, Result, Value};

use serde_json::Value as Json;

/// Decode a wire value into the attribute's typed value.
///
/// Returns `Ok(None)` when the wire value is null. A value of the wrong shape
/// fails with a coercion error; a transformable kind without a registered
/// converter fails with a configuration error.
pub fn decode(
    attribute: &Attribute,
    wire: &Json,
    converters: &Converters,
) -> Result<Option<Value>> {
    if wire.is_null() {
        return Ok(None);
    }

    let value = match &attribute.kind {
        AttributeKind::String => Value::String(text::decode_string(wire)?),
        AttributeKind::I16 => Value::I16(number::decode_int(wire, "i16")?),
        AttributeKind::I32 => Value::I32(number::decode_int(wire, "i32")?),
        AttributeKind::I64 => Value::I64(number::decode_int(wire, "i64")?),
        AttributeKind::Float => Value::F32(number::decode_f32(wire)?),
        AttributeKind::Double => Value::F64(number::decode_f64(wire)?),
        AttributeKind::Bool => Value::Bool(boolean::decode(wire)?),
        AttributeKind::Decimal => Value::Decimal(decimal::decode(wire)?),
        AttributeKind::Date => Value::Date(date::decode(wire)?),
        AttributeKind::Binary => Value::Bytes(binary::decode(wire)?),
        AttributeKind::Url => Value::Url(text::decode_url(wire)?),
        AttributeKind::List => Value::List(structured::decode_list(wire)?),
        AttributeKind::Map => Value::Map(structured::decode_map(wire)?),
        AttributeKind::Transformable(repr) => converters.get(repr)?.decode(wire)?,
    };

    Ok(Some(value))
}

/// Encode the attribute's typed value for the wire.
///
/// A value whose variant does not match the attribute's kind fails with a
/// coercion error.
pub fn encode(attribute: &Attribute, value: &Value, converters: &Converters) -> Result<Json> {
    let wire = match (&attribute.kind, value) {
        (AttributeKind::String, Value::String(v)) => text::encode_string(v),
        (AttributeKind::I16, Value::I16(v)) => number::encode_int(*v),
        (AttributeKind::I32, Value::I32(v)) => number::encode_int(*v),
        (AttributeKind::I64, Value::I64(v)) => number::encode_int(*v),
        (AttributeKind::Float, Value::F32(v)) => number::encode_f32(*v)?,
        (AttributeKind::Double, Value::F64(v)) => number::encode_f64(*v)?,
        (AttributeKind::Bool, Value::Bool(v)) => boolean::encode(*v),
        (AttributeKind::Decimal, Value::Decimal(v)) => decimal::encode(v),
        (AttributeKind::Date, Value::Date(v)) => date::encode(v),
        (AttributeKind::Binary, Value::Bytes(v)) => binary::encode(v),
        (AttributeKind::Url, Value::Url(v)) => text::encode_url(v),
        (AttributeKind::List, Value::List(v)) => structured::encode_list(v),
        (AttributeKind::Map, Value::Map(v)) => structured::encode_map(v),
        (AttributeKind::Transformable(repr), value) => converters.get(repr)?.encode(value)?,
        (kind, value) => {
            return Err(Error::coercion(
                format_args!("{} value {value}", value.kind_name()),
                kind.name(),
            ))
        }
    };

    Ok(wire)
}
