use crate::{Error, Result};

use serde_json::{Number, Value as Json};

/// Decode an integral number or integer string, checked against the range
/// of `T`.
pub fn decode_int<T>(wire: &Json, kind: &str) -> Result<T>
where
    T: TryFrom<i64>,
{
    let wide = match wire {
        Json::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            (float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64)
                .then_some(float as i64)
        }),
        Json::String(string) => string.trim().parse::<i64>().ok(),
        _ => None,
    };

    wide.and_then(|wide| T::try_from(wide).ok())
        .ok_or_else(|| Error::coercion(wire, kind))
}

pub fn encode_int(value: impl Into<i64>) -> Json {
    Json::from(value.into())
}

/// Decode a finite number or numeric string.
pub fn decode_f64(wire: &Json) -> Result<f64> {
    let decoded = match wire {
        Json::Number(number) => number.as_f64(),
        Json::String(string) => string.trim().parse::<f64>().ok(),
        _ => None,
    };

    decoded
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::coercion(wire, "double"))
}

pub fn decode_f32(wire: &Json) -> Result<f32> {
    let value = decode_f64(wire).map_err(|_| Error::coercion(wire, "float"))? as f32;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::coercion(wire, "float"))
    }
}

pub fn encode_f64(value: f64) -> Result<Json> {
    Number::from_f64(value)
        .map(Json::Number)
        .ok_or_else(|| Error::coercion(value, "a JSON number"))
}

pub fn encode_f32(value: f32) -> Result<Json> {
    encode_f64(f64::from(value))
}
