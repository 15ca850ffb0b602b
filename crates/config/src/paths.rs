//! Path codec between nested configuration trees and flat dot-path maps.
//!
//! Responsibilities:
//! - Flatten a nested `serde_json::Value` tree into a map keyed by
//!   dot-joined paths, and rebuild the tree from such a map.
//! - Convert dot-paths to the upper-snake environment variable convention.
//!
//! Does NOT handle:
//! - Environment scanning or value coercion (see `env`).
//! - File parsing (see `adapter`).
//!
//! Invariants:
//! - Only non-null objects are descended into; arrays, null, and scalars are
//!   opaque leaves stored under their current path.
//! - `unflatten(flatten(t)) == t` for trees whose composite nodes are all
//!   non-empty objects (empty interior objects flatten to nothing and
//!   arrays are carried through unchanged).

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flattens a nested tree into a map from dot-joined paths to leaf values.
///
/// Arrays are never element-wise expanded: an array value is a leaf, stored
/// as-is under its current path. An empty object contributes no entries.
pub fn flatten(tree: &Value) -> BTreeMap<String, Value> {
    let mut flat = BTreeMap::new();
    flatten_into(tree, String::new(), &mut flat);
    flat
}

fn flatten_into(value: &Value, prefix: String, flat: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match child {
                    Value::Object(_) => flatten_into(child, path, flat),
                    _ => {
                        flat.insert(path, child.clone());
                    }
                }
            }
        }
        // A non-object root has no path to store it under.
        _ => {}
    }
}

/// Rebuilds a nested tree from a map of dot-joined paths.
///
/// Intermediate containers are materialized on demand; a later key that
/// descends through an existing leaf replaces it with a container.
pub fn unflatten(flat: &BTreeMap<String, Value>) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        let mut segments = path.split('.').peekable();
        let mut current = &mut root;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value.clone());
            } else {
                let slot = current
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                let Value::Object(next) = slot else {
                    unreachable!("slot was just made an object");
                };
                current = next;
            }
        }
    }
    Value::Object(root)
}

/// Converts a camelCase or PascalCase identifier to UPPER_SNAKE_CASE.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let chars: Vec<char> = input.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev_lower = chars[i - 1].is_ascii_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev_lower || (chars[i - 1].is_ascii_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

/// Converts a dot-path to its environment variable name.
///
/// `database.host` becomes `DATABASE_HOST`; with a prefix of `APP` it
/// becomes `APP_DATABASE_HOST`.
pub fn to_env_var_name(path: &str, prefix: Option<&str>) -> String {
    let name = path
        .split('.')
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{name}"),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let tree = json!({"server": {"port": 8080, "tls": {"enabled": true}}, "name": "api"});
        let flat = flatten(&tree);

        assert_eq!(flat.get("server.port"), Some(&json!(8080)));
        assert_eq!(flat.get("server.tls.enabled"), Some(&json!(true)));
        assert_eq!(flat.get("name"), Some(&json!("api")));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_flatten_treats_arrays_and_null_as_leaves() {
        let tree = json!({"hosts": ["a", "b"], "extra": null});
        let flat = flatten(&tree);

        assert_eq!(flat.get("hosts"), Some(&json!(["a", "b"])));
        assert_eq!(flat.get("extra"), Some(&Value::Null));
    }

    #[test]
    fn test_unflatten_materializes_intermediate_containers() {
        let mut flat = BTreeMap::new();
        flat.insert("a.b.c".to_string(), json!(1));
        flat.insert("a.d".to_string(), json!("x"));

        let tree = unflatten(&flat);
        assert_eq!(tree, json!({"a": {"b": {"c": 1}, "d": "x"}}));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let tree = json!({
            "server": {"port": 3000, "hosts": ["a", "b"]},
            "logging": {"level": "info"},
            "debug": false
        });

        assert_eq!(unflatten(&flatten(&tree)), tree);
    }

    #[test]
    fn test_unflatten_dotless_keys_stay_top_level() {
        let mut flat = BTreeMap::new();
        flat.insert("serverPort".to_string(), json!(3000));

        assert_eq!(unflatten(&flat), json!({"serverPort": 3000}));
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("databaseHost"), "DATABASE_HOST");
        assert_eq!(to_snake_case("HTTPServer"), "HTTP_SERVER");
        assert_eq!(to_snake_case("port"), "PORT");
    }

    #[test]
    fn test_to_env_var_name() {
        assert_eq!(to_env_var_name("database.host", None), "DATABASE_HOST");
        assert_eq!(to_env_var_name("database.host", Some("APP")), "APP_DATABASE_HOST");
        assert_eq!(to_env_var_name("port", Some("")), "PORT");
    }
}
