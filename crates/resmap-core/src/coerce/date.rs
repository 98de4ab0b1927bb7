use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value as Json};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Decode epoch seconds or an ISO-8601 string. The result is truncated to
/// millisecond precision.
pub fn decode(wire: &Json) -> Result<DateTime<Utc>> {
    let decoded = match wire {
        Json::Number(number) => from_epoch(number),
        Json::String(string) => from_iso8601(string.trim()),
        _ => None,
    };

    decoded.ok_or_else(|| Error::coercion(wire, "date"))
}

/// Encode as epoch seconds; whole seconds are emitted as an integer.
pub fn encode(value: &DateTime<Utc>) -> Json {
    let millis = value.timestamp_millis();
    if millis % 1000 == 0 {
        Json::from(millis / 1000)
    } else {
        // |millis| stays far below 2^53, so the quotient round-trips
        Json::from(millis as f64 / 1000.0)
    }
}

fn from_epoch(number: &Number) -> Option<DateTime<Utc>> {
    if let Some(seconds) = number.as_i64() {
        return DateTime::<Utc>::from_timestamp(seconds, 0);
    }

    let seconds = number.as_f64()?;
    if !seconds.is_finite() {
        return None;
    }

    DateTime::<Utc>::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

fn from_iso8601(src: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(src)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(src, format).ok())
        })
        .map(|date| date.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(src, format).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(src, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })?;

    DateTime::<Utc>::from_timestamp_millis(parsed.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let date = decode(&json!("2020-09-13T12:26:40.123456Z")).unwrap();
        assert_eq!(date.timestamp_millis(), 1_600_000_000_123);
        assert_eq!(encode(&date), json!(1_600_000_000.123));
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let date = decode(&json!("2020-09-13T14:26:40+02:00")).unwrap();
        assert_eq!(date.timestamp(), 1_600_000_000);
        let date = decode(&json!("2020-09-13T14:26:40+0200")).unwrap();
        assert_eq!(date.timestamp(), 1_600_000_000);
    }

    #[test]
    fn non_finite_and_out_of_range_epochs_fail() {
        assert!(decode(&json!(1e300)).is_err());
        assert!(decode(&json!(i64::MAX)).is_err());
    }
}
