//! Placeholder tokens and their replacement values.
//!
//! A token is a literal string such as `%path%`. Tokens come from the caller
//! (registered by bare name and wrapped in `%`) or from top-level document
//! keys that start with `%` (stored verbatim).

use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix marking a top-level key as a placeholder declaration.
pub const PLACEHOLDER_MARKER: char = '%';

/// Replacement table scoped to a single resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    tokens: BTreeMap<String, String>,
    /// Non-empty tokens, longest first.
    by_length: Vec<String>,
}

impl Replacements {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from bare names, each registered as `%name%`.
    pub fn from_names<I, K, V>(names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (name, value) in names {
            table.insert_name(name.as_ref(), value);
        }
        table
    }

    /// Register a bare name as `%name%`.
    pub fn insert_name(&mut self, name: &str, value: impl Into<String>) {
        self.insert(
            format!("{PLACEHOLDER_MARKER}{name}{PLACEHOLDER_MARKER}"),
            value.into(),
        );
    }

    /// Register a token verbatim, coercing the value to a string.
    ///
    /// Later declarations of the same token overwrite earlier ones.
    pub fn declare(&mut self, token: &str, value: &Value) {
        self.insert(token.to_string(), coerce_to_string(value));
    }

    fn insert(&mut self, token: String, value: String) {
        if !token.is_empty() && !self.tokens.contains_key(&token) {
            // Longest first so that `%path.root%` beats `%path%` at one position.
            let at = self.by_length.partition_point(|t| t.len() >= token.len());
            self.by_length.insert(at, token.clone());
        }
        self.tokens.insert(token, value);
    }

    /// Look up the replacement for a token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(token, replacement)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every known token in `input` in a single pass.
    ///
    /// Replacement text is never rescanned, so a value that itself contains
    /// token syntax stays as written. When several tokens match at the same
    /// position the longest one wins.
    pub fn apply(&self, input: &str) -> String {
        if self.tokens.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(ch) = rest.chars().next() {
            match self.by_length.iter().find(|token| rest.starts_with(token.as_str())) {
                Some(token) => {
                    output.push_str(&self.tokens[token]);
                    rest = &rest[token.len()..];
                }
                None => {
                    output.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        output
    }
}

/// Coerce a declared placeholder value to its replacement text.
///
/// Uses a loose string cast: `true` is `"1"`, `false` and `null` are empty.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Whether a top-level key declares a placeholder.
pub fn is_placeholder_key(key: &str) -> bool {
    key.starts_with(PLACEHOLDER_MARKER)
}
