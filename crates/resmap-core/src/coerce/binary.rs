use crate::{Error, Result};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value as Json;

/// Decode a base64 string or an array of byte values.
pub fn decode(wire: &Json) -> Result<Vec<u8>> {
    let decoded = match wire {
        Json::String(string) => STANDARD.decode(string.trim()).ok(),
        Json::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
            .collect(),
        _ => None,
    };

    decoded.ok_or_else(|| Error::coercion(wire, "binary"))
}

/// Encode as a standard base64 string.
pub fn encode(value: &[u8]) -> Json {
    Json::String(STANDARD.encode(value))
}
