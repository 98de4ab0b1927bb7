use crate::{Error, Result};

use serde_json::Value as Json;
use url::Url;

/// Decode a string. Numbers and booleans are accepted in their textual
/// form, as identifiers often arrive as either.
pub fn decode_string(wire: &Json) -> Result<String> {
    match wire {
        Json::String(string) => Ok(string.clone()),
        Json::Number(number) => Ok(number.to_string()),
        Json::Bool(value) => Ok(value.to_string()),
        _ => Err(Error::coercion(wire, "string")),
    }
}

pub fn encode_string(value: &str) -> Json {
    Json::String(value.to_string())
}

/// Decode an absolute URL.
pub fn decode_url(wire: &Json) -> Result<Url> {
    wire.as_str()
        .and_then(|string| Url::parse(string.trim()).ok())
        .ok_or_else(|| Error::coercion(wire, "url"))
}

pub fn encode_url(value: &Url) -> Json {
    Json::String(value.as_str().to_string())
}
