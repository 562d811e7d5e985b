//! Hierarchical YAML configuration resolution.
//!
//! A [`ConfigResolver`] reads one document and merges it into a [`Registry`]:
//! 1. **Imports** - `imports: [{resource: file.yml}]` entries are resolved
//!    relative to the importing file and registered first, depth-first
//! 2. **Placeholders** - top-level `%name%` keys declare replacement tokens,
//!    alongside any the caller supplied
//! 3. **Merge** - every string leaf is substituted, then the tree is deep
//!    merged key by key (optionally nested under a prefix)
//!
//! ## Merge Strategy
//! - Mappings: merged recursively, newer values win
//! - Sequences and scalars: replaced entirely

mod loader;
mod merge;
mod options;
mod placeholders;
mod registry;
mod resolver;

pub use loader::{parse_document, read_document};
pub use merge::{deep_merge, merge_into, substitute};
pub use options::ResolverOptions;
pub use placeholders::{PLACEHOLDER_MARKER, Replacements, coerce_to_string, is_placeholder_key};
pub use registry::Registry;
pub use resolver::{ConfigResolver, IMPORTS_KEY, RESOURCE_KEY};

/// A parsed configuration value.
pub type ConfigTree = serde_json::Value;
