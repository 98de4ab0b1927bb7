//! Conventions shared by every resource on the wire.

use serde_json::Value as Json;

/// Key under which a resource carries its type tag.
pub const TYPE_KEY: &str = "type";

/// Conventional wire key of a resource's identifier.
pub const IDENTIFIER_KEY: &str = "id";

/// Key under which a response envelope nests its list of resources.
pub const OBJECTS_KEY: &str = "objects";

/// Returns the resource's type tag, if it is an object carrying one.
pub fn type_tag<'a>(resource: &'a Json, type_key: &str) -> Option<&'a str> {
    resource.as_object()?.get(type_key)?.as_str()
}

/// Returns the value stored under `key`, treating null as absent.
pub fn field<'a>(resource: &'a Json, key: &str) -> Option<&'a Json> {
    resource
        .as_object()?
        .get(key)
        .filter(|value| !value.is_null())
}

/// Short human-readable description of a wire value's shape.
pub fn shape(wire: &Json) -> &'static str {
    match wire {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
