//! Null-safe field decoders.
//!
//! Record services hand back partially populated records, and occasionally
//! values of the wrong JSON type. Every decoder here maps anything it does not
//! recognise to "absent" instead of failing the whole collection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn identifier<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        _ => None,
    })
}

/// Only a JSON `true`/`false` is a flag; `"true"`, `1` and friends are absent.
pub fn strict_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

pub fn references<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(normalize_reference(&s)),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![normalize_reference(&s)],
        _ => Vec::new(),
    })
}

pub fn fields<'de, D, F>(d: D) -> Result<F, D::Error>
where
    D: Deserializer<'de>,
    F: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(d)? {
        value @ Value::Object(_) => F::deserialize(value).unwrap_or_default(),
        _ => F::default(),
    })
}

/// Lookup fields may hold the full record URL; the id is its last segment.
pub fn normalize_reference(raw: &str) -> String {
    if raw.contains("://") {
        raw.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Inner {
        #[serde(default, deserialize_with = "number")]
        preis: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "fields")]
        fields: Inner,
    }

    #[test]
    fn test_fields_of_wrong_type_become_default() {
        for raw in [json!("oops"), json!([]), json!(3), json!(true), Value::Null] {
            let outer: Outer = serde_json::from_value(json!({ "fields": raw })).unwrap();
            assert_eq!(outer.fields, Inner::default());
        }

        let outer: Outer = serde_json::from_value(json!({"fields": {"preis": 9.5}})).unwrap();
        assert_eq!(outer.fields.preis, Some(9.5));
    }

    #[test]
    fn test_normalize_reference() {
        assert_eq!(normalize_reference("c1"), "c1");
        assert_eq!(
            normalize_reference("https://my.example.de/rest/apps/abc/records/c42"),
            "c42"
        );
        assert_eq!(normalize_reference("https://x/records/c7/"), "c7");
    }
}
