//! Registry capability that resolved configuration is merged into.

use serde_json::{Map, Value};

/// A key/value container (typically a dependency-injection registry).
///
/// The resolver only ever checks, reads and upserts top-level keys; it never
/// depends on a concrete container type. No internal synchronization is
/// assumed: callers sharing one registry across threads must serialize
/// `register()` calls themselves.
pub trait Registry {
    /// Whether a value is stored under `key`.
    fn exists(&self, key: &str) -> bool;

    /// The value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Insert or replace the value stored under `key`.
    fn set(&mut self, key: &str, value: Value);
}

impl Registry for Map<String, Value> {
    fn exists(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

impl<R: Registry + ?Sized> Registry for &mut R {
    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        (**self).set(key, value)
    }
}
