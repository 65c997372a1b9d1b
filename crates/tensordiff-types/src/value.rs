//! The canonical value model.
//!
//! Every input tensordiff compares — a parsed config, a decoded tensor
//! archive, a metadata document — is first converted into a [`Value`] tree.
//! The engine only ever sees this model, so comparison semantics are defined
//! once, independent of where the data came from.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the canonical tree: one of six closed tags.
///
/// Numbers are always `f64`; integers are normalized on conversion so numeric
/// equality (and epsilon tolerance) is well-defined across source formats.
/// Nested numeric arrays represent tensors — shape is implicit in nesting
/// depth and sequence lengths, no dedicated tensor tag exists at this layer.
///
/// Mappings preserve insertion order, which drives the deterministic ordering
/// of diff output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Human-readable name of this value's tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Returns `true` if the two values carry the same tag.
    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Returns `true` for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The element list, if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The key-value pairs, if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Number of direct children (0 for leaves).
    pub fn child_count(&self) -> usize {
        match self {
            Value::Sequence(items) => items.len(),
            Value::Mapping(map) => map.len(),
            _ => 0,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

/// Renders as compact JSON, the notation used in human-readable diff lines.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, Value)]) -> Value {
        Value::Mapping(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn type_names_cover_all_tags() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::String("x".into()).type_name(), "string");
        assert_eq!(Value::Sequence(vec![]).type_name(), "sequence");
        assert_eq!(Value::Mapping(IndexMap::new()).type_name(), "mapping");
    }

    #[test]
    fn same_kind_ignores_payload() {
        assert!(Value::Number(1.0).same_kind(&Value::Number(2.0)));
        assert!(!Value::Number(1.0).same_kind(&Value::Bool(true)));
    }

    #[test]
    fn mapping_preserves_insertion_order() {
        let value = mapping(&[("z", 1.0.into()), ("a", 2.0.into()), ("m", 3.0.into())]);
        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn serializes_to_plain_json() {
        let value = mapping(&[
            ("name", "resnet".into()),
            ("frozen", true.into()),
            ("layers", Value::Sequence(vec![1.0.into(), 2.0.into()])),
            ("extra", Value::Null),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            r#"{"name":"resnet","frozen":true,"layers":[1.0,2.0],"extra":null}"#
        );
    }

    #[test]
    fn deserializes_from_plain_json() {
        let value: Value = serde_json::from_str(r#"{"a":[1,true,null,"s"]}"#).unwrap();
        let items = value.as_mapping().unwrap()["a"].as_sequence().unwrap();
        assert_eq!(items[0], Value::Number(1.0));
        assert_eq!(items[1], Value::Bool(true));
        assert_eq!(items[2], Value::Null);
        assert_eq!(items[3], Value::String("s".into()));
    }

    #[test]
    fn display_is_compact_json() {
        let value = Value::Sequence(vec![Value::Null, Value::Bool(false)]);
        assert_eq!(value.to_string(), "[null,false]");
    }
}
