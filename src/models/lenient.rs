//! Tolerant field decoders for documents written by several clients.
//!
//! Phone numbers, metrics and amounts show up either as JSON numbers or as
//! strings depending on which app wrote them.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected a string, got {}", other))),
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", s))),
        other => Err(D::Error::custom(format!("expected a number, got {}", other))),
    }
}

pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64(deserializer)?.unwrap_or_default())
}

/// A `null` list reads as empty.
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::string")]
        phone: String,
        #[serde(default, deserialize_with = "super::opt_f64")]
        weight: Option<f64>,
        #[serde(default, deserialize_with = "super::vec")]
        tags: Vec<String>,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let sample: Sample = serde_json::from_value(json!({"phone": 5551234, "weight": "72.5"})).unwrap();
        assert_eq!(sample.phone, "5551234");
        assert_eq!(sample.weight, Some(72.5));

        let sample: Sample = serde_json::from_value(json!({"phone": null})).unwrap();
        assert_eq!(sample.phone, "");
        assert_eq!(sample.weight, None);
    }

    #[test]
    fn test_null_list_is_empty() {
        let sample: Sample = serde_json::from_value(json!({"tags": null})).unwrap();
        assert!(sample.tags.is_empty());

        let sample: Sample = serde_json::from_value(json!({"tags": ["a", "b"]})).unwrap();
        assert_eq!(sample.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_structures() {
        assert!(serde_json::from_value::<Sample>(json!({"phone": {"a": 1}})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"weight": "heavy"})).is_err());
    }
}
