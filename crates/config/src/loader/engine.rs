//! The resolution engine.
//!
//! Responsibilities:
//! - Run one `load()` pass: dotenv bootstrap, file, environment fallback,
//!   schema defaults, optional persistence.
//! - Persist the resolved tree through the resolved adapter (`save`).
//! - Attach per-leaf provenance to the result.
//!
//! Does NOT handle:
//! - Option resolution (see `builder`).
//! - The repair algorithm itself (see `repair`).
//!
//! Invariants:
//! - Resolution is synchronous; a returned result is always fully resolved
//!   and fully validated.
//! - The loader holds no cross-call state; every `load()` is independent.
//! - Persistence failures never raise past the loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::ConfigError;
use super::repair::validate_with_repair;
use super::result::ConfigResult;
use crate::adapter::{AdapterRegistry, FormatAdapter};
use crate::env::{Environment, EnvironmentIngester, IngestedEnv};
use crate::paths::flatten;
use crate::schema::Schema;
use crate::source::Source;

/// Resolves configuration from a file, the environment, and schema defaults
/// into a single validated snapshot.
///
/// Constructed through [`ConfigLoader::builder`]; immutable afterwards.
pub struct ConfigLoader<S: Schema> {
    pub(super) schema: S,
    pub(super) registry: AdapterRegistry,
    pub(super) adapter: Arc<dyn FormatAdapter>,
    pub(super) config_path: PathBuf,
    pub(super) create_if_missing: bool,
    pub(super) use_env_fallback: bool,
    pub(super) env_prefix: String,
    pub(super) use_dotenv: bool,
    pub(super) dotenv_path: PathBuf,
    pub(super) environment: Box<dyn Environment>,
}

impl<S: Schema> ConfigLoader<S> {
    /// Starts building a loader around the given schema.
    pub fn builder(schema: S) -> super::builder::LoaderBuilder<S> {
        super::builder::LoaderBuilder::new(schema)
    }

    /// The resolved configuration file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The adapter resolved at construction time.
    pub fn adapter(&self) -> &dyn FormatAdapter {
        self.adapter.as_ref()
    }

    /// The adapter registry backing this loader.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Resolves the configuration.
    ///
    /// Precedence is file, then environment (when enabled), then schema
    /// defaults (when `create_if_missing`); the first branch that yields a
    /// validated tree wins and the rest are never consulted.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Validation` when a candidate fails validation with
    ///   issues the repair pass may not or could not fix.
    /// - `ConfigError::NoSource` when every branch is disabled or empty.
    pub fn load(&self) -> Result<ConfigResult, ConfigError> {
        if self.use_dotenv {
            self.bootstrap_dotenv();
        }

        if let Some(candidate) = self.read_file_candidate() {
            let config = validate_with_repair(&self.schema, &candidate)?;
            let sources = blanket_sources(&config, Source::File);
            return Ok(ConfigResult {
                config,
                sources,
                config_path: Some(self.config_path.clone()),
            });
        }

        if self.use_env_fallback {
            let ingested =
                EnvironmentIngester::new(self.environment.as_ref(), &self.env_prefix).ingest();
            let config = validate_with_repair(&self.schema, &ingested.candidate())?;
            if self.create_if_missing {
                self.save(&config);
            }
            let sources = env_sources(&config, &ingested);
            return Ok(ConfigResult {
                config,
                sources,
                config_path: self.create_if_missing.then(|| self.config_path.clone()),
            });
        }

        if self.create_if_missing {
            // An empty candidate forces the schema to supply its defaults.
            let config = validate_with_repair(&self.schema, &Value::Object(Map::new()))?;
            self.save(&config);
            let sources = blanket_sources(&config, Source::Default);
            return Ok(ConfigResult {
                config,
                sources,
                config_path: Some(self.config_path.clone()),
            });
        }

        Err(ConfigError::NoSource {
            config_path: self.config_path.clone(),
        })
    }

    /// Loads the dotenv file into the process environment, if it exists.
    /// Already-set variables are not overwritten.
    fn bootstrap_dotenv(&self) {
        if !self.dotenv_path.exists() {
            return;
        }
        if let Err(error) = dotenvy::from_path(&self.dotenv_path) {
            tracing::warn!(
                path = %self.dotenv_path.display(),
                error = %error,
                "Failed to load dotenv file; continuing without it"
            );
        }
    }

    /// Reads and parses the configuration file, treating every failure as
    /// "no file config".
    fn read_file_candidate(&self) -> Option<Value> {
        if !self.config_path.exists() {
            return None;
        }
        let text = match std::fs::read_to_string(&self.config_path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %error,
                    "Failed to read configuration file; falling back"
                );
                return None;
            }
        };
        match self.adapter.parse(&text) {
            Ok(tree) => Some(tree),
            Err(error) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %error,
                    "Failed to parse configuration file; falling back"
                );
                None
            }
        }
    }

    /// Persists the resolved tree to the config path.
    ///
    /// Failure is logged and swallowed: the in-memory result is still
    /// returned to the caller.
    pub(super) fn save(&self, config: &Value) {
        let text = match self.adapter.stringify(config) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %error,
                    "Failed to serialize configuration for persistence"
                );
                return;
            }
        };

        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(
                path = %parent.display(),
                error = %error,
                "Could not create configuration directory"
            );
            return;
        }

        if let Err(error) = std::fs::write(&self.config_path, text) {
            tracing::warn!(
                path = %self.config_path.display(),
                error = %error,
                "Failed to write configuration file"
            );
        }
    }
}

/// Tags every flattened leaf of `config` with the same source.
fn blanket_sources(config: &Value, source: Source) -> BTreeMap<String, Source> {
    flatten(config)
        .into_keys()
        .map(|key| (key, source.clone()))
        .collect()
}

/// Tags leaves covered by ingested environment keys `Env`; leaves filled by
/// validation defaults or repair are `Default`.
fn env_sources(config: &Value, ingested: &IngestedEnv) -> BTreeMap<String, Source> {
    flatten(config)
        .into_keys()
        .map(|key| {
            let source = if ingested.covers(&key) {
                Source::Env
            } else {
                Source::Default
            };
            (key, source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blanket_sources_covers_every_leaf() {
        let config = json!({"server": {"port": 1, "host": "x"}, "debug": true});
        let sources = blanket_sources(&config, Source::File);

        assert_eq!(sources.len(), 3);
        assert!(sources.values().all(|s| *s == Source::File));
        assert!(sources.contains_key("server.port"));
    }

    #[test]
    fn test_env_sources_distinguishes_ingested_and_defaulted_leaves() {
        let mut ingested = IngestedEnv::default();
        ingested.flat.insert("serverPort".into(), json!(3000));
        ingested.sources.insert("serverPort".into(), Source::Env);

        let config = json!({"serverPort": 3000, "logging": {"level": "info"}});
        let sources = env_sources(&config, &ingested);

        assert_eq!(sources.get("serverPort"), Some(&Source::Env));
        assert_eq!(sources.get("logging.level"), Some(&Source::Default));
    }
}
