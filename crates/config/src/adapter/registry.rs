//! Ordered registry of format adapters.

use std::path::Path;
use std::sync::Arc;

use super::{FormatAdapter, JsonAdapter, YamlAdapter};

/// Insertion-ordered collection of [`FormatAdapter`]s.
///
/// Registration order is the tie-break for every lookup: the first adapter
/// registered that matches wins. Duplicate ids are dropped on registration,
/// so a custom adapter cannot override a built-in by re-using its id.
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn FormatAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Creates a registry seeded with the built-in JSON and YAML adapters,
    /// in that order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonAdapter));
        registry.register(Arc::new(YamlAdapter));
        registry
    }

    /// Registers an adapter. No-op if an adapter with the same id already
    /// exists.
    pub fn register(&mut self, adapter: Arc<dyn FormatAdapter>) {
        if !self.adapters.iter().any(|a| a.id() == adapter.id()) {
            self.adapters.push(adapter);
        }
    }

    /// Registers several adapters, preserving their order.
    pub fn register_all<I>(&mut self, adapters: I)
    where
        I: IntoIterator<Item = Arc<dyn FormatAdapter>>,
    {
        for adapter in adapters {
            self.register(adapter);
        }
    }

    /// Looks an adapter up by its id.
    pub fn get_by_id(&self, id: &str) -> Option<Arc<dyn FormatAdapter>> {
        self.adapters.iter().find(|a| a.id() == id).cloned()
    }

    /// Returns the first adapter, in registration order, whose `can_handle`
    /// claims the given path.
    pub fn get_for_file(&self, path: &Path) -> Option<Arc<dyn FormatAdapter>> {
        self.adapters.iter().find(|a| a.can_handle(path)).cloned()
    }

    /// Returns the first adapter whose declared extensions contain the given
    /// extension. A leading dot is normalized away and matching is
    /// case-insensitive.
    pub fn get_for_extension(&self, extension: &str) -> Option<Arc<dyn FormatAdapter>> {
        let wanted = extension.strip_prefix('.').unwrap_or(extension);
        self.adapters
            .iter()
            .find(|a| {
                a.extensions()
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
            })
            .cloned()
    }

    /// Returns a defensive copy of the registered adapters, in registration
    /// order.
    pub fn get_all(&self) -> Vec<Arc<dyn FormatAdapter>> {
        self.adapters.clone()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
