//! Structured error types for configuration resolution.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Source errors
    SourceUnavailable,
    ParseFailed,

    // Import errors
    InvalidImport,
    ImportCycle,

    // Caller input errors
    InvalidReplacement,
    InvalidOptions,
}

/// Errors raised while loading, importing or merging a configuration file.
///
/// Every variant is fail-fast: a failure anywhere in an import chain aborts
/// the whole `register()` call and propagates to the caller as-is.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source path is empty, missing or unreadable.
    #[error("Config source '{}' is unavailable: {reason}", .path.display())]
    Source { path: PathBuf, reason: String },

    /// The document parser rejected the file contents.
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// An `imports` directive is malformed.
    #[error("Invalid import in '{}': {reason}", .path.display())]
    Import { path: PathBuf, reason: String },

    /// An import revisits a file that is still being resolved.
    #[error("Import cycle detected: {}", format_chain(.chain))]
    ImportCycle { chain: Vec<PathBuf> },

    /// A caller replacement is not of the form `name=value`.
    #[error("Invalid replacement '{0}': expected NAME=VALUE")]
    InvalidReplacement(String),

    /// A resolver options document could not be read.
    #[error("Invalid resolver options in '{}': {source}", .path.display())]
    Options {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Source { .. } => ErrorCode::SourceUnavailable,
            ConfigError::Parse { .. } => ErrorCode::ParseFailed,
            ConfigError::Import { .. } => ErrorCode::InvalidImport,
            ConfigError::ImportCycle { .. } => ErrorCode::ImportCycle,
            ConfigError::InvalidReplacement(_) => ErrorCode::InvalidReplacement,
            ConfigError::Options { .. } => ErrorCode::InvalidOptions,
        }
    }

    // Convenience constructors

    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Source {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_import(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Import {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
