use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use resmap_core::coerce::{self, Converters};
use resmap_core::schema::{Attribute, AttributeKind};
use resmap_core::{Json, Value};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn attr(kind: AttributeKind) -> Attribute {
    Attribute::new("field", kind)
}

fn decode(kind: AttributeKind, wire: Json) -> Option<Value> {
    coerce::decode(&attr(kind), &wire, &Converters::default()).unwrap()
}

fn encode(kind: AttributeKind, value: &Value) -> Json {
    coerce::encode(&attr(kind), value, &Converters::default()).unwrap()
}

fn assert_round_trip(kind: AttributeKind, value: Value) {
    let wire = encode(kind.clone(), &value);
    assert_eq!(decode(kind, wire), Some(value));
}

#[test]
fn typed_values_survive_encode_then_decode() {
    let date = Utc.with_ymd_and_hms(2020, 9, 13, 12, 26, 40).unwrap();

    assert_round_trip(AttributeKind::String, Value::from("Acme"));
    assert_round_trip(AttributeKind::I16, Value::I16(i16::MIN));
    assert_round_trip(AttributeKind::I32, Value::I32(-7));
    assert_round_trip(AttributeKind::I64, Value::I64(i64::MAX));
    assert_round_trip(AttributeKind::Float, Value::F32(1.5));
    assert_round_trip(AttributeKind::Double, Value::F64(-0.125));
    assert_round_trip(AttributeKind::Bool, Value::Bool(true));
    assert_round_trip(
        AttributeKind::Decimal,
        Value::Decimal(Decimal::from_str("1234.5600").unwrap()),
    );
    assert_round_trip(AttributeKind::Date, Value::Date(date));
    assert_round_trip(
        AttributeKind::Date,
        Value::Date(date + chrono::Duration::milliseconds(250)),
    );
    assert_round_trip(AttributeKind::Binary, Value::Bytes(vec![0, 159, 146, 150]));
    assert_round_trip(
        AttributeKind::Url,
        Value::Url("https://example.com/people/p1".parse().unwrap()),
    );
    assert_round_trip(AttributeKind::List, Value::List(vec![json!(1), json!("two")]));
    assert_round_trip(
        AttributeKind::Map,
        Value::Map(json!({"a": 1, "b": [true]}).as_object().unwrap().clone()),
    );
}

#[test]
fn dates_decode_from_epoch_and_iso8601() {
    let expected = Utc.timestamp_opt(1_600_000_000, 0).unwrap();

    for wire in [
        json!(1_600_000_000),
        json!(1_600_000_000.0),
        json!("2020-09-13T12:26:40Z"),
        json!("2020-09-13T14:26:40+02:00"),
        json!("2020-09-13 12:26:40"),
    ] {
        assert_eq!(
            decode(AttributeKind::Date, wire.clone()),
            Some(Value::Date(expected)),
            "decoding {wire}"
        );
    }

    assert_eq!(
        decode(AttributeKind::Date, json!("2020-09-13")),
        Some(Value::Date(Utc.with_ymd_and_hms(2020, 9, 13, 0, 0, 0).unwrap()))
    );
}

#[test]
fn dates_encode_as_epoch_seconds() {
    let whole = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
    assert_eq!(encode(AttributeKind::Date, &Value::Date(whole)), json!(1_600_000_000));

    let fractional: DateTime<Utc> = whole + chrono::Duration::milliseconds(500);
    assert_eq!(
        encode(AttributeKind::Date, &Value::Date(fractional)),
        json!(1_600_000_000.5)
    );
}

#[test]
fn dates_reject_other_shapes() {
    for wire in [json!(true), json!("next tuesday"), json!([1]), json!({})] {
        let err = coerce::decode(&attr(AttributeKind::Date), &wire, &Converters::default())
            .unwrap_err();
        assert!(err.is_coercion(), "{wire} => {err}");
    }
}

#[test]
fn decimals_keep_exact_digits() {
    let decoded = decode(AttributeKind::Decimal, json!("0.1")).unwrap();
    assert_eq!(decoded, Value::Decimal(Decimal::from_str("0.1").unwrap()));
    assert_eq!(encode(AttributeKind::Decimal, &decoded), json!("0.1"));

    assert_eq!(
        decode(AttributeKind::Decimal, json!(19.99)),
        Some(Value::Decimal(Decimal::from_str("19.99").unwrap()))
    );
    assert_eq!(
        decode(AttributeKind::Decimal, json!("1.5e3")),
        Some(Value::Decimal(Decimal::from(1500)))
    );
}

#[test]
fn decimal_numbers_keep_their_source_digits() {
    let wire: Json = serde_json::from_str("12345678901234567.891").unwrap();
    assert_eq!(
        decode(AttributeKind::Decimal, wire),
        Some(Value::Decimal(Decimal::from_str("12345678901234567.891").unwrap()))
    );

    // The scale survives too
    let wire: Json = serde_json::from_str("1200.50").unwrap();
    let decoded = decode(AttributeKind::Decimal, wire).unwrap();
    assert_eq!(encode(AttributeKind::Decimal, &decoded), json!("1200.50"));

    let resource: Json = serde_json::from_str(r#"{"revenue": 0.30000000000000004441}"#).unwrap();
    assert_eq!(
        decode(AttributeKind::Decimal, resource["revenue"].clone()),
        Some(Value::Decimal(Decimal::from_str("0.30000000000000004441").unwrap()))
    );
}

#[test]
fn booleans_accept_normal_forms() {
    for (wire, expected) in [
        (json!(true), true),
        (json!(false), false),
        (json!(1), true),
        (json!(0), false),
        (json!("true"), true),
        (json!("false"), false),
        (json!("1"), true),
        (json!("0"), false),
    ] {
        assert_eq!(decode(AttributeKind::Bool, wire), Some(Value::Bool(expected)));
    }

    for wire in [json!("yes"), json!("TRUE"), json!("False"), json!(2)] {
        let err = coerce::decode(&attr(AttributeKind::Bool), &wire, &Converters::default())
            .unwrap_err();
        assert!(err.is_coercion(), "{wire}");
    }
    assert_eq!(encode(AttributeKind::Bool, &Value::Bool(false)), json!(false));
}

#[test]
fn binary_accepts_base64_or_bytes() {
    assert_eq!(
        decode(AttributeKind::Binary, json!("aGk=")),
        Some(Value::Bytes(b"hi".to_vec()))
    );
    assert_eq!(
        decode(AttributeKind::Binary, json!([104, 105])),
        Some(Value::Bytes(b"hi".to_vec()))
    );
    assert_eq!(
        encode(AttributeKind::Binary, &Value::Bytes(b"hi".to_vec())),
        json!("aGk=")
    );
}

#[test]
fn integers_are_range_checked() {
    assert_eq!(decode(AttributeKind::I16, json!("42")), Some(Value::I16(42)));

    let err = coerce::decode(&attr(AttributeKind::I16), &json!(70_000), &Converters::default())
        .unwrap_err();
    assert!(err.is_coercion());
}

#[test]
fn structured_kinds_check_shape_only() {
    let err = coerce::decode(&attr(AttributeKind::List), &json!({}), &Converters::default())
        .unwrap_err();
    assert!(err.is_coercion());

    let err = coerce::decode(&attr(AttributeKind::Map), &json!([]), &Converters::default())
        .unwrap_err();
    assert!(err.is_coercion());
}

#[test]
fn null_is_absent() {
    for kind in [
        AttributeKind::String,
        AttributeKind::Date,
        AttributeKind::Decimal,
        AttributeKind::transformable("Unregistered"),
    ] {
        assert_eq!(decode(kind, Json::Null), None);
    }
}

#[test]
fn mismatched_values_fail_to_encode() {
    let err = coerce::encode(
        &attr(AttributeKind::Date),
        &Value::from("2020-09-13"),
        &Converters::default(),
    )
    .unwrap_err();
    assert!(err.is_coercion());
}
