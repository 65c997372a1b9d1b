//! Conversion from host document models into the canonical [`Value`] tree.
//!
//! Each supported host model (JSON, YAML, TOML) classifies every node into
//! exactly one of the six canonical tags. Integers are normalized to `f64` so
//! numeric comparison is well-defined regardless of the source format. All
//! host models are acyclic by construction, so conversion terminates on any
//! input; only nodes with no canonical representation are rejected.

use indexmap::IndexMap;

use crate::error::ConversionError;
use crate::value::Value;

/// Convert a parsed JSON document. Total: every JSON value is representable.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        // as_f64 is lossy for integers beyond 2^53, matching the model's
        // single-number-type normalization.
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

/// Convert a parsed YAML document.
///
/// Scalar mapping keys (strings, numbers, booleans) are stringified; sequence
/// or mapping keys have no canonical form and are rejected, as are YAML tags.
pub fn from_yaml(yaml: serde_yaml::Value) -> Result<Value, ConversionError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => Ok(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(items) => Ok(Value::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        serde_yaml::Value::Mapping(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, value) in map {
                out.insert(yaml_key(key)?, from_yaml(value)?);
            }
            Ok(Value::Mapping(out))
        }
        serde_yaml::Value::Tagged(tagged) => Err(ConversionError::UnsupportedNode(format!(
            "YAML tag {}",
            tagged.tag
        ))),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, ConversionError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(ConversionError::NonScalarKey(format!("{other:?}"))),
    }
}

/// Convert a parsed TOML document. Total: datetimes are carried as strings.
pub fn from_toml(toml: toml::Value) -> Value {
    match toml {
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Integer(n) => Value::Number(n as f64),
        toml::Value::Float(n) => Value::Number(n),
        toml::Value::String(s) => Value::String(s),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

/// Convert a canonical tree back into a JSON document.
///
/// The inverse of [`from_json`]. Non-finite numbers have no JSON literal and
/// come back as `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_classifies_every_tag() {
        let value = from_json(json!({
            "null": null,
            "bool": true,
            "int": 3,
            "float": 0.5,
            "text": "hi",
            "seq": [1, 2],
        }));
        let map = value.as_mapping().unwrap();
        assert_eq!(map["null"], Value::Null);
        assert_eq!(map["bool"], Value::Bool(true));
        assert_eq!(map["int"], Value::Number(3.0));
        assert_eq!(map["float"], Value::Number(0.5));
        assert_eq!(map["text"], Value::String("hi".into()));
        assert_eq!(
            map["seq"],
            Value::Sequence(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn json_integers_normalize_to_f64() {
        assert_eq!(from_json(json!(7)), Value::Number(7.0));
        assert_eq!(from_json(json!(-7)), Value::Number(-7.0));
    }

    #[test]
    fn yaml_scalar_keys_stringify() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: a\ntrue: b\nplain: c").unwrap();
        let value = from_yaml(yaml).unwrap();
        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["1", "true", "plain"]);
    }

    #[test]
    fn yaml_complex_key_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("[1, 2]: value").unwrap();
        assert!(matches!(
            from_yaml(yaml),
            Err(ConversionError::NonScalarKey(_))
        ));
    }

    #[test]
    fn yaml_tag_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("!custom 5").unwrap();
        assert!(matches!(
            from_yaml(yaml),
            Err(ConversionError::UnsupportedNode(_))
        ));
    }

    #[test]
    fn toml_datetime_becomes_string() {
        let doc: toml::Value = toml::from_str("when = 2024-01-01T00:00:00Z").unwrap();
        let value = from_toml(doc);
        let when = value.as_mapping().unwrap()["when"].as_str().unwrap();
        assert!(when.starts_with("2024-01-01"));
    }

    #[test]
    fn to_json_inverts_from_json() {
        let original = json!({"a": [1.5, null, "x"], "b": {"c": false}});
        assert_eq!(to_json(&from_json(original.clone())), original);
    }

    #[test]
    fn to_json_maps_non_finite_to_null() {
        assert_eq!(to_json(&Value::Number(f64::NAN)), serde_json::Value::Null);
    }
}
