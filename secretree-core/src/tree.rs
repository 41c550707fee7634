//! Folding flat `(key, value)` entries into a nested config tree and back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A secret's value once decoded: string, number, boolean, null, array or map.
pub type ConfigValue = Value;

/// Nested configuration assembled from secret paths.
pub type ConfigTree = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub key: String,
    pub value: ConfigValue,
}

/// Parses a stored secret string as JSON, keeping the literal string when it
/// is not valid JSON.
pub fn parse_value(raw: &str) -> ConfigValue {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// A map is intermediate when at least one of its own values is itself a map.
///
/// Intermediate maps are walked by [`flatten`]; leaf maps such as
/// `{"username": .., "password": ..}` are kept whole as a single value.
pub fn is_intermediate(map: &ConfigTree) -> bool {
    map.values().any(Value::is_object)
}

/// Flattens a nested tree into delimited keys, stopping at leaf maps.
pub fn flatten(tree: &ConfigTree, delimiter: &str) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    flatten_into(tree, None, delimiter, &mut out);
    out
}

fn flatten_into(tree: &ConfigTree, prefix: Option<&str>, delimiter: &str, out: &mut Vec<FlatEntry>) {
    for (key, value) in tree {
        let path = match prefix {
            Some(p) => format!("{p}{delimiter}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(child) if is_intermediate(child) => {
                flatten_into(child, Some(&path), delimiter, out);
            }
            _ => out.push(FlatEntry {
                key: path,
                value: value.clone(),
            }),
        }
    }
}

/// Builds a nested tree from delimited keys.
///
/// Intermediate nodes are created as needed. Later entries overwrite earlier
/// ones at the same path, and a non-map value sitting where a later key needs
/// an intermediate node is replaced by a map.
pub fn unflatten<I, K>(pairs: I, delimiter: &str) -> ConfigTree
where
    I: IntoIterator<Item = (K, ConfigValue)>,
    K: AsRef<str>,
{
    let mut root = ConfigTree::new();
    for (key, value) in pairs {
        let path: Vec<&str> = key.as_ref().split(delimiter).collect();
        insert_at(&mut root, &path, value);
    }
    root
}

fn insert_at(node: &mut ConfigTree, path: &[&str], value: ConfigValue) {
    match path {
        [] => {}
        [last] => {
            node.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = node
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                insert_at(map, rest, value);
            }
        }
    }
}
