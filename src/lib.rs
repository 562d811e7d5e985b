//! YAML configuration registry.
//!
//! Loads YAML documents with `imports` and `%placeholder%` support and deep
//! merges them into a key/value registry.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;

pub use config::{ConfigResolver, ConfigTree, Registry, ResolverOptions};
pub use error::{ConfigError, ConfigResult, ErrorCode};
