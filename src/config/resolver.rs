//! Resolves a configuration file (and everything it imports) into a registry.
//!
//! One `register()` call runs, in order:
//! 1. read the document
//! 2. register every `imports` resource, depth-first, into the same registry
//! 3. learn `%token%` declarations from the remaining top-level keys
//! 4. substitute tokens and deep-merge the tree (optionally under a prefix)

use super::loader::read_document;
use super::merge::merge_into;
use super::options::ResolverOptions;
use super::placeholders::{Replacements, is_placeholder_key};
use super::registry::Registry;
use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level key listing documents to import.
pub const IMPORTS_KEY: &str = "imports";

/// Field of an import entry naming the imported file.
pub const RESOURCE_KEY: &str = "resource";

/// Loads one configuration file into a [`Registry`].
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    path: PathBuf,
    replacements: Replacements,
    prefix: Option<String>,
}

impl ConfigResolver {
    /// Create a resolver for `path` with no replacements and no prefix.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            replacements: Replacements::new(),
            prefix: None,
        }
    }

    /// Create a resolver from construction options.
    pub fn from_options(options: ResolverOptions) -> Self {
        let resolver = Self::new(options.source).with_replacements(options.replacements);
        match options.prefix {
            Some(prefix) => resolver.with_prefix(prefix),
            None => resolver,
        }
    }

    /// Add caller replacements keyed by bare name (`data` becomes `%data%`).
    pub fn with_replacements<I, K, V>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in names {
            self.replacements.insert_name(name.as_ref(), value);
        }
        self
    }

    /// Add a single caller replacement keyed by bare name.
    pub fn with_replacement(mut self, name: &str, value: impl Into<String>) -> Self {
        self.replacements.insert_name(name, value);
        self
    }

    /// Nest the whole resolved document under `prefix`.
    ///
    /// An empty prefix means no prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The replacement table, including tokens learned from the last
    /// registered document.
    pub fn replacements(&self) -> &Replacements {
        &self.replacements
    }

    /// Load the document and merge it into `registry`.
    ///
    /// Fails fast: an error anywhere in the import chain aborts the call.
    /// Imports that completed before the failure stay merged.
    pub fn register<R: Registry + ?Sized>(&mut self, registry: &mut R) -> ConfigResult<()> {
        let mut stack = ImportStack::default();
        self.register_within(registry, &mut stack)
    }

    fn register_within<R: Registry + ?Sized>(
        &mut self,
        registry: &mut R,
        stack: &mut ImportStack,
    ) -> ConfigResult<()> {
        let tree = read_document(&self.path)?;

        stack.enter(&self.path)?;
        let result = self.resolve(registry, tree, stack);
        stack.leave();
        result
    }

    fn resolve<R: Registry + ?Sized>(
        &mut self,
        registry: &mut R,
        mut tree: Map<String, Value>,
        stack: &mut ImportStack,
    ) -> ConfigResult<()> {
        self.expand_imports(registry, &mut tree, stack)?;
        self.collect_placeholders(&tree);

        if tree.is_empty() {
            debug!(path = %self.path.display(), "config document has no keys to merge");
            return Ok(());
        }

        let tree = match &self.prefix {
            Some(prefix) => {
                let mut wrapped = Map::new();
                wrapped.insert(prefix.clone(), Value::Object(tree));
                wrapped
            }
            None => tree,
        };

        let keys = tree.len();
        merge_into(registry, tree, &self.replacements);
        info!(
            path = %self.path.display(),
            prefix = self.prefix.as_deref().unwrap_or(""),
            keys,
            "registered config"
        );
        Ok(())
    }

    /// Register every resource listed under `imports`, then drop the key.
    fn expand_imports<R: Registry + ?Sized>(
        &self,
        registry: &mut R,
        tree: &mut Map<String, Value>,
        stack: &mut ImportStack,
    ) -> ConfigResult<()> {
        let Some(imports) = tree.shift_remove(IMPORTS_KEY) else {
            return Ok(());
        };

        let entries = match imports {
            Value::Array(entries) => entries,
            Value::Null => return Ok(()),
            _ => {
                return Err(ConfigError::invalid_import(
                    &self.path,
                    format!("'{IMPORTS_KEY}' must be a sequence of {{{RESOURCE_KEY}: <file>}} entries"),
                ));
            }
        };

        let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        for (index, entry) in entries.iter().enumerate() {
            let resource = self.import_resource(index, entry)?;
            let import_path = base_dir.join(resource);
            debug!(
                from = %self.path.display(),
                import = %import_path.display(),
                "importing config"
            );

            ConfigResolver::new(import_path).register_within(registry, stack)?;
        }
        Ok(())
    }

    fn import_resource<'a>(&self, index: usize, entry: &'a Value) -> ConfigResult<&'a str> {
        let entry = entry.as_object().ok_or_else(|| {
            ConfigError::invalid_import(&self.path, format!("entry {index} is not a mapping"))
        })?;

        match entry.get(RESOURCE_KEY) {
            Some(Value::String(resource)) if !resource.is_empty() => Ok(resource),
            Some(Value::String(_)) => Err(ConfigError::invalid_import(
                &self.path,
                format!("entry {index} has an empty '{RESOURCE_KEY}'"),
            )),
            Some(_) => Err(ConfigError::invalid_import(
                &self.path,
                format!("entry {index} has a non-string '{RESOURCE_KEY}'"),
            )),
            None => Err(ConfigError::invalid_import(
                &self.path,
                format!("entry {index} is missing '{RESOURCE_KEY}'"),
            )),
        }
    }

    /// Learn `%token%` declarations from top-level keys.
    fn collect_placeholders(&mut self, tree: &Map<String, Value>) {
        for (key, value) in tree {
            if is_placeholder_key(key) {
                self.replacements.declare(key, value);
                debug!(path = %self.path.display(), token = %key, "declared placeholder");
            }
        }
    }
}

/// Files whose registration is in progress, outermost first.
#[derive(Debug, Default)]
struct ImportStack {
    files: Vec<PathBuf>,
}

impl ImportStack {
    fn enter(&mut self, path: &Path) -> ConfigResult<()> {
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        if let Some(start) = self.files.iter().position(|f| *f == canonical) {
            let mut chain = self.files[start..].to_vec();
            chain.push(canonical);
            return Err(ConfigError::ImportCycle { chain });
        }

        self.files.push(canonical);
        Ok(())
    }

    fn leave(&mut self) {
        self.files.pop();
    }
}
