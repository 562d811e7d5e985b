//! Resolver construction options.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Construction parameters for a [`ConfigResolver`](super::ConfigResolver).
///
/// ```yaml
/// source: config/app.yml
/// prefix: app
/// replacements:
///   root: /var/www
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Path of the root document.
    pub source: PathBuf,

    /// Bare placeholder names (without `%`) mapped to their values.
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,

    /// Registry key the whole document is nested under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ResolverOptions {
    /// Options for a single source with no replacements and no prefix.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Parse options from YAML text.
    ///
    /// A relative `source` is resolved against `base_dir` when given.
    pub fn from_yaml(content: &str, base_dir: Option<&Path>) -> Result<Self, serde_yaml::Error> {
        let mut options: Self = serde_yaml::from_str(content)?;
        if let Some(dir) = base_dir
            && options.source.is_relative()
        {
            options.source = dir.join(&options.source);
        }
        Ok(options)
    }

    /// Load options from a YAML file. A relative `source` is resolved
    /// against the options file's directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::unavailable(path, e.to_string()))?;
        Self::from_yaml(&content, path.parent()).map_err(|source| ConfigError::Options {
            path: path.to_path_buf(),
            source,
        })
    }
}
