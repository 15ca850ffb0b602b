//! Format adapters for reading and writing configuration files.
//!
//! Responsibilities:
//! - Define the `FormatAdapter` seam: a named codec (parse/stringify) plus a
//!   file-path-matching predicate.
//! - Ship the built-in JSON and YAML adapters.
//! - Provide the ordered, id-deduplicated `AdapterRegistry`.
//!
//! Does NOT handle:
//! - Choosing which adapter a loader uses (see `loader::LoaderBuilder`).
//! - File I/O (the loader reads and writes; adapters only transcode text).
//!
//! Invariants:
//! - `can_handle` is authoritative for file dispatch; `extensions` is
//!   authoritative for explicit-extension lookup. The two are not required
//!   to agree.
//! - Registration order is preserved exactly; the first adapter registered
//!   under an id wins and later duplicates are silently ignored.

use std::ffi::OsStr;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

mod json;
mod registry;
mod yaml;

pub use json::JsonAdapter;
pub use registry::AdapterRegistry;
pub use yaml::YamlAdapter;

/// Errors produced while transcoding configuration text.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to parse {format} configuration: {source}")]
    Parse {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to serialize {format} configuration: {source}")]
    Serialize {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A format-specific codec plus a file-path-matching predicate.
///
/// Implementations are registered in an [`AdapterRegistry`] and selected
/// either explicitly, by file path (`can_handle`), or by extension lookup.
pub trait FormatAdapter: Send + Sync {
    /// Unique identifier; the dedup key within a registry.
    fn id(&self) -> &str;

    /// File extensions this adapter claims for explicit-extension lookup,
    /// without the leading dot. The first entry names freshly created
    /// config files.
    fn extensions(&self) -> &[&str];

    /// Parse textual content into a configuration tree.
    fn parse(&self, text: &str) -> Result<Value, AdapterError>;

    /// Serialize a configuration tree back to text.
    fn stringify(&self, tree: &Value) -> Result<String, AdapterError>;

    /// Whether this adapter claims the given file path.
    ///
    /// The default matches the path's extension case-insensitively against
    /// `extensions()`; implementations may claim paths on any other basis.
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(ext))
            })
    }
}
