use crate::{Error, Result};

use serde_json::Value as Json;

/// Decode `true`/`false`, `0`/`1`, or their string forms.
pub fn decode(wire: &Json) -> Result<bool> {
    let decoded = match wire {
        Json::Bool(value) => Some(*value),
        Json::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Json::String(string) => match string.trim() {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        },
        _ => None,
    };

    decoded.ok_or_else(|| Error::coercion(wire, "bool"))
}

pub fn encode(value: bool) -> Json {
    Json::Bool(value)
}
