//! The outcome of one resolution pass.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::source::Source;

/// A fully resolved, validated configuration snapshot.
#[derive(Debug, Clone)]
pub struct ConfigResult {
    /// The validated configuration tree.
    pub config: Value,
    /// Provenance per flattened leaf of `config`, keyed by dot-path.
    pub sources: BTreeMap<String, Source>,
    /// Present only when the file was the source of truth or was
    /// (re)written during resolution.
    pub config_path: Option<PathBuf>,
}

impl ConfigResult {
    /// Deserializes the resolved tree into a typed configuration.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.config)
    }

    /// The provenance of a single leaf, by dot-path.
    pub fn source_of(&self, path: &str) -> Option<&Source> {
        self.sources.get(path)
    }
}
