//! Forgiving field decoders for template and card JSON
//!
//! Editors write `null`, empty strings and stale enum values into optional
//! fields. Each decoder here treats such a value as absent, so the field
//! falls back to its default instead of rejecting the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A number, or a string holding one. `null`, `""` and anything else are absent.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// A non-empty string. Numbers and booleans are stringified; `null`, `""`,
/// arrays and objects are absent.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Like [`string`], with absent values read as empty
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// A value of `T`, or absent when the JSON does not decode as one
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| T::deserialize(value).ok()))
}

/// Like [`value`], with absent values read as `T::default()`
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(value(deserializer)?.unwrap_or_default())
}

/// A list, with `null` read as empty. Malformed entries are still errors.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionLayout;

    #[derive(Debug, Default, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "string")]
        s: Option<String>,
        #[serde(default, deserialize_with = "or_default")]
        layout: SectionLayout,
    }

    fn decode(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(decode(r#"{"n": 4.5}"#).n, Some(4.5));
        assert_eq!(decode(r#"{"n": " 12 "}"#).n, Some(12.0));
        assert_eq!(decode(r#"{"n": null}"#).n, None);
        assert_eq!(decode(r#"{"n": ""}"#).n, None);
        assert_eq!(decode(r#"{"n": "wide"}"#).n, None);
        assert_eq!(decode(r#"{"n": [1]}"#).n, None);
        assert_eq!(decode("{}").n, None);
    }

    #[test]
    fn test_string_treats_empty_as_absent() {
        assert_eq!(decode(r#"{"s": "hi"}"#).s.as_deref(), Some("hi"));
        assert_eq!(decode(r#"{"s": 7}"#).s.as_deref(), Some("7"));
        assert_eq!(decode(r#"{"s": ""}"#).s, None);
        assert_eq!(decode(r#"{"s": null}"#).s, None);
        assert_eq!(decode(r#"{"s": {"a": 1}}"#).s, None);
    }

    #[test]
    fn test_unknown_enum_falls_back_to_default() {
        assert_eq!(decode(r#"{"layout": "row"}"#).layout, SectionLayout::Row);
        assert_eq!(decode(r#"{"layout": "grid"}"#).layout, SectionLayout::Stack);
        assert_eq!(decode(r#"{"layout": null}"#).layout, SectionLayout::Stack);
        assert_eq!(decode(r#"{"layout": 3}"#).layout, SectionLayout::Stack);
    }
}
