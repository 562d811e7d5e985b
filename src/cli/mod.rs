//! CLI definitions for yaml-config-registry
//!
//! This module defines the CLI structure using clap's derive macros.
//! Every file given on the command line is registered, in order, into one
//! in-memory registry which is then printed.

use crate::config::{ConfigResolver, ResolverOptions};
use crate::error::{ConfigError, ConfigResult};
use crate::format::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve YAML configuration files into a single merged registry
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration files, registered in order
    #[arg(value_name = "FILE", required_unless_present = "options")]
    pub files: Vec<PathBuf>,

    /// Nest every file under this registry key
    #[arg(short, long, value_name = "KEY")]
    pub prefix: Option<String>,

    /// Placeholder replacement, `%NAME%` becomes VALUE (repeatable)
    #[arg(short, long = "replace", value_name = "NAME=VALUE")]
    pub replacements: Vec<String>,

    /// Resolver options file (source, prefix, replacements), registered first
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Print only this top-level registry key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}

impl Cli {
    /// Build one resolver per source, options file first.
    pub fn resolvers(&self) -> ConfigResult<Vec<ConfigResolver>> {
        let replacements = self
            .replacements
            .iter()
            .map(|raw| parse_replacement(raw))
            .collect::<ConfigResult<Vec<_>>>()?;

        let mut resolvers = Vec::with_capacity(self.files.len() + 1);

        if let Some(ref path) = self.options {
            let options = ResolverOptions::load(path)?;
            resolvers.push(ConfigResolver::from_options(options));
        }

        for file in &self.files {
            let mut resolver =
                ConfigResolver::new(file).with_replacements(replacements.iter().cloned());
            if let Some(ref prefix) = self.prefix {
                resolver = resolver.with_prefix(prefix.clone());
            }
            resolvers.push(resolver);
        }

        Ok(resolvers)
    }

    /// Log filter from `RUST_LOG`-style directives, falling back to
    /// `debug`/`info` from `--verbose` when absent or invalid.
    pub fn log_filter(&self, directives: Option<&str>) -> EnvFilter {
        let fallback = if self.verbose { "debug" } else { "info" };
        directives
            .filter(|d| !d.trim().is_empty())
            .and_then(|d| EnvFilter::try_new(d).ok())
            .unwrap_or_else(|| EnvFilter::new(fallback))
    }
}

/// Parse a `NAME=VALUE` replacement argument.
pub fn parse_replacement(raw: &str) -> ConfigResult<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(ConfigError::InvalidReplacement(raw.to_string())),
    }
}
