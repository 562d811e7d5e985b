//! Deep merge and placeholder substitution for configuration trees.
//!
//! Mappings are merged field by field with newer values taking precedence.
//! Sequences and scalars are replaced entirely, never combined.

use super::placeholders::Replacements;
use super::registry::Registry;
use serde_json::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans, nulls are replaced entirely
/// - Keys only present in base survive untouched
///
/// # Example
/// ```
/// use serde_json::json;
/// use yaml_config_registry::config::deep_merge;
///
/// let base = json!({
///     "db.options": { "driver": "pdo_mysql", "password": "secret" },
///     "hosts": ["a", "b"]
/// });
/// let overlay = json!({
///     "db.options": { "password": null },
///     "hosts": ["c"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({
///         "db.options": { "driver": "pdo_mysql", "password": null },
///         "hosts": ["c"]
///     })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value.take(), overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Replace placeholder tokens in every string leaf of `value`.
pub fn substitute(value: Value, replacements: &Replacements) -> Value {
    if replacements.is_empty() {
        return value;
    }

    match value {
        Value::String(s) => Value::String(replacements.apply(&s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| substitute(item, replacements))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, substitute(v, replacements)))
                .collect(),
        ),
        scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => scalar,
    }
}

/// Merge every top-level entry of `tree` into `registry`.
///
/// Values are substituted first. A mapping landing on an existing key is deep
/// merged with what the registry holds; anything else is set directly.
pub fn merge_into<R: Registry + ?Sized>(
    registry: &mut R,
    tree: Map<String, Value>,
    replacements: &Replacements,
) {
    for (key, value) in tree {
        let value = substitute(value, replacements);
        let merged = match registry.get(&key) {
            Some(existing) if registry.exists(&key) && value.is_object() => {
                deep_merge(existing.clone(), value)
            }
            _ => value,
        };
        registry.set(&key, merged);
    }
}
