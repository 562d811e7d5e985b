//! Reads a YAML document from disk into a configuration tree.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the document at `path`.
///
/// An empty or `null` document yields an empty mapping. A document whose
/// root is a scalar or a sequence has no keys to register and is treated
/// the same way.
pub fn read_document(path: &Path) -> ConfigResult<Map<String, Value>> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::unavailable(
            path,
            "a valid configuration file must be given before reading the config",
        ));
    }

    if !path.is_file() {
        return Err(ConfigError::unavailable(path, "the config file does not exist"));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::unavailable(path, e.to_string()))?;
    debug!(path = %path.display(), bytes = content.len(), "read config file");

    parse_document(path, &content)
}

/// Parse document text. `path` is only used for error reporting.
pub fn parse_document(path: &Path, content: &str) -> ConfigResult<Map<String, Value>> {
    // A stream without any document is not valid input for the parser.
    if is_blank(content) {
        return Ok(Map::new());
    }

    let value: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => {
            warn!(
                path = %path.display(),
                kind = value_kind(&other),
                "config document root is not a mapping, ignoring"
            );
            Ok(Map::new())
        }
    }
}

fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
