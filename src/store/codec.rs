//! Conversion between plain JSON documents and the hosted store's typed
//! value wire format (`{"stringValue": "..."}`, `{"mapValue": {"fields": ..}}`, ...).

use regex::Regex;
use serde_json::{json, Map, Number, Value};
use std::sync::OnceLock;

use super::{Fields, StoreError};

/// Encode a JSON value as a typed wire value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode every top-level field of a document.
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

/// Decode a typed wire value into plain JSON.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::Decode(format!("expected a typed value, got {}", value)))?;

    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| StoreError::Decode("empty typed value".to_string()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| StoreError::Decode(format!("invalid booleanValue: {}", inner))),
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| StoreError::Decode(format!("invalid {}: {}", kind, inner))),
        "geoPointValue" => Ok(json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(json!(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(json!(0.0)),
        })),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                Some(other) => {
                    return Err(StoreError::Decode(format!("invalid arrayValue: {}", other)))
                }
                None => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields") {
            Some(fields) => Ok(Value::Object(decode_fields(fields)?)),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(StoreError::Decode(format!("unsupported value kind: {}", other))),
    }
}

/// Decode a `fields` object into plain top-level fields.
pub fn decode_fields(fields: &Value) -> Result<Fields, StoreError> {
    let object = fields
        .as_object()
        .ok_or_else(|| StoreError::Decode(format!("expected fields object, got {}", fields)))?;

    object
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

fn decode_integer(inner: &Value) -> Result<Value, StoreError> {
    let parsed = match inner {
        Value::String(s) => s.parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    };

    parsed
        .map(|i| Value::Number(i.into()))
        .ok_or_else(|| StoreError::Decode(format!("invalid integerValue: {}", inner)))
}

fn decode_double(inner: &Value) -> Result<Value, StoreError> {
    let parsed = match inner {
        Value::Number(n) => n.as_f64(),
        // NaN and the infinities arrive as strings and have no JSON form
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(f) => Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)),
        None => Err(StoreError::Decode(format!("invalid doubleValue: {}", inner))),
    }
}

/// Quote a field name for use in an update mask.
pub fn field_path(name: &str) -> String {
    static SIMPLE: OnceLock<Regex> = OnceLock::new();
    let simple = SIMPLE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

    if simple.is_match(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Extract the trailing document id from a resource name.
pub fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_nested_gym_document() {
        let gym = json!({
            "gym_name": "Iron Temple",
            "ratings": 4.5,
            "visitors": [],
            "amenities": [{"name": "Sauna", "isSelected": true}],
            "license": null,
            "transactions": [{"widthDrawAmount": 1200}],
        });

        let encoded = encode_fields(gym.as_object().unwrap());

        assert_eq!(encoded["gym_name"], json!({"stringValue": "Iron Temple"}));
        assert_eq!(encoded["ratings"], json!({"doubleValue": 4.5}));
        assert_eq!(encoded["visitors"], json!({"arrayValue": {"values": []}}));
        assert_eq!(encoded["license"], json!({"nullValue": null}));
        assert_eq!(
            encoded["amenities"],
            json!({"arrayValue": {"values": [{"mapValue": {"fields": {
                "name": {"stringValue": "Sauna"},
                "isSelected": {"booleanValue": true}
            }}}]}})
        );
        assert_eq!(
            encoded["transactions"]["arrayValue"]["values"][0]["mapValue"]["fields"]["widthDrawAmount"],
            json!({"integerValue": "1200"})
        );
    }

    #[test]
    fn test_decode_wire_document() {
        let wire = json!({
            "title": {"stringValue": "Spring Marathon"},
            "price": {"integerValue": "25"},
            "isFree": {"booleanValue": false},
            "startTime": {"timestampValue": "2030-04-01T09:00:00Z"},
            "tags": {"arrayValue": {}},
            "venue": {"mapValue": {"fields": {"lat": {"doubleValue": 51.5}}}},
            "empty": {"mapValue": {}},
        });

        let fields = decode_fields(&wire).unwrap();

        assert_eq!(fields["title"], json!("Spring Marathon"));
        assert_eq!(fields["price"], json!(25));
        assert_eq!(fields["isFree"], json!(false));
        assert_eq!(fields["startTime"], json!("2030-04-01T09:00:00Z"));
        assert_eq!(fields["tags"], json!([]));
        assert_eq!(fields["venue"], json!({"lat": 51.5}));
        assert_eq!(fields["empty"], json!({}));
    }

    #[test]
    fn test_decode_special_doubles() {
        assert_eq!(decode_value(&json!({"doubleValue": "NaN"})).unwrap(), Value::Null);
        assert_eq!(decode_value(&json!({"doubleValue": 2.5})).unwrap(), json!(2.5));
    }

    #[test]
    fn test_decode_rejects_unknown_kinds() {
        assert!(decode_value(&json!({"weirdValue": 1})).is_err());
        assert!(decode_value(&json!("plain")).is_err());
        assert!(decode_value(&json!({"integerValue": "abc"})).is_err());
    }

    #[test]
    fn test_field_path_quoting() {
        assert_eq!(field_path("gym_type"), "gym_type");
        assert_eq!(field_path("isApproved"), "isApproved");
        assert_eq!(field_path("opening-hours"), "`opening-hours`");
        assert_eq!(field_path("9lives"), "`9lives`");
    }

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/Gyms/abc123"),
            Some("abc123")
        );
        assert_eq!(document_id("projects/p/databases/(default)/documents/Gyms/"), None);
    }
}
