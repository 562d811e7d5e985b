//! yaml-config-registry
//!
//! Registers YAML configuration files into one registry and prints it.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value, json};
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use yaml_config_registry::cli::Cli;
use yaml_config_registry::error::ConfigError;
use yaml_config_registry::format::render;

fn init_logging(cli: &Cli) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = cli.log_filter(directives.as_deref());
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("failed to open log file '{filename}'"))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let mut registry = Map::new();
    for mut resolver in cli.resolvers()? {
        debug!(path = %resolver.path().display(), "registering");
        resolver.register(&mut registry)?;
    }

    let output = match cli.key {
        Some(ref key) => registry
            .get(key)
            .cloned()
            .with_context(|| format!("key '{key}' is not present in the registry"))?,
        None => Value::Object(registry),
    };

    print!("{}", render(&output, cli.format)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ConfigError>() {
                Some(config_err) => {
                    let report = json!({ "code": config_err.code(), "message": config_err.to_string() });
                    eprintln!("Error: {report}");
                }
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
