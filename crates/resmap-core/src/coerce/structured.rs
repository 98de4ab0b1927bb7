use crate::{Error, Result};

use serde_json::{Map, Value as Json};

/// Check that the wire value is a sequence. Elements are not inspected.
pub fn decode_list(wire: &Json) -> Result<Vec<Json>> {
    match wire {
        Json::Array(items) => Ok(items.clone()),
        _ => Err(Error::coercion(wire, "list")),
    }
}

pub fn encode_list(value: &[Json]) -> Json {
    Json::Array(value.to_vec())
}

/// Check that the wire value is a keyed map. Entries are not inspected.
pub fn decode_map(wire: &Json) -> Result<Map<String, Json>> {
    match wire {
        Json::Object(map) => Ok(map.clone()),
        _ => Err(Error::coercion(wire, "map")),
    }
}

pub fn encode_map(value: &Map<String, Json>) -> Json {
    Json::Object(value.clone())
}
