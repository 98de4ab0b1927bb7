use crate::{Error, Result};

use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::str::FromStr;

/// Decode a number or numeric string without going through binary floating
/// point.
///
/// JSON numbers keep their source text (`arbitrary_precision`), so the
/// digits and the scale of `1200.50` both survive.
pub fn decode(wire: &Json) -> Result<Decimal> {
    let decoded = match wire {
        Json::Number(number) => parse(&number.to_string()),
        Json::String(string) => parse(string.trim()),
        _ => None,
    };

    decoded.ok_or_else(|| Error::coercion(wire, "decimal"))
}

/// Encode as the canonical decimal string, keeping the value's scale.
pub fn encode(value: &Decimal) -> Json {
    Json::String(value.to_string())
}

fn parse(src: &str) -> Option<Decimal> {
    if src.contains(['e', 'E']) {
        Decimal::from_scientific(src).ok()
    } else {
        Decimal::from_str(src).ok()
    }
}
