//! Loader construction.
//!
//! Responsibilities:
//! - Collect options and resolve them once into an immutable `ConfigLoader`.
//! - Resolve the format adapter: explicit adapter, else first registry match
//!   for the config path, else the JSON adapter by id.
//! - Derive default paths (`<cwd>/config.<ext>`, `<cwd>/.env`).
//!
//! Does NOT handle:
//! - Resolution itself (see `engine`).
//!
//! Invariants:
//! - Custom adapters are merged after the built-ins, so registration-order
//!   tie-breaking cannot be used to shadow a built-in.
//! - Failing to resolve any adapter is a fatal construction error.

use std::path::PathBuf;
use std::sync::Arc;

use super::engine::ConfigLoader;
use super::error::ConfigError;
use crate::adapter::{AdapterRegistry, FormatAdapter};
use crate::constants::{
    DEFAULT_CONFIG_BASENAME, DEFAULT_DOTENV_FILENAME, DEFAULT_ENV_PREFIX, JSON_ADAPTER_ID,
};
use crate::env::{Environment, ProcessEnvironment};
use crate::schema::Schema;

/// Builder for [`ConfigLoader`]; options default per the resolution
/// contract (create missing files, allow environment fallback, load dotenv,
/// empty prefix).
pub struct LoaderBuilder<S: Schema> {
    schema: S,
    config_path: Option<PathBuf>,
    adapter: Option<Arc<dyn FormatAdapter>>,
    adapters: Vec<Arc<dyn FormatAdapter>>,
    create_if_missing: bool,
    use_env_fallback: bool,
    env_prefix: String,
    use_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    environment: Option<Box<dyn Environment>>,
}

impl<S: Schema> LoaderBuilder<S> {
    pub(crate) fn new(schema: S) -> Self {
        Self {
            schema,
            config_path: None,
            adapter: None,
            adapters: Vec::new(),
            create_if_missing: true,
            use_env_fallback: true,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            use_dotenv: true,
            dotenv_path: None,
            environment: None,
        }
    }

    /// Set the configuration file to read and write.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Force a specific adapter, skipping path-based detection.
    pub fn with_adapter(mut self, adapter: Arc<dyn FormatAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Merge extra adapters into the default registry, after the built-ins.
    pub fn with_adapters<I>(mut self, adapters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn FormatAdapter>>,
    {
        self.adapters.extend(adapters);
        self
    }

    /// Whether to write the resolved configuration when no file existed.
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Whether environment-derived configuration is permitted when no file
    /// exists.
    pub fn with_env_fallback(mut self, fallback: bool) -> Self {
        self.use_env_fallback = fallback;
        self
    }

    /// Set the prefix used when scanning environment variables.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Whether a dotenv file is loaded into the process environment before
    /// resolution.
    pub fn with_dotenv(mut self, dotenv: bool) -> Self {
        self.use_dotenv = dotenv;
        self
    }

    /// Set the dotenv file location.
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Inject an environment provider (primarily for testing).
    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Some(Box::new(environment));
        self
    }

    /// Resolve options into an immutable loader.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AdapterResolution` when no adapter claims the
    /// config path and no JSON adapter is registered.
    pub fn build(self) -> Result<ConfigLoader<S>, ConfigError> {
        let mut registry = AdapterRegistry::with_defaults();
        registry.register_all(self.adapters);

        let adapter = match self.adapter {
            Some(adapter) => adapter,
            None => self
                .config_path
                .as_deref()
                .and_then(|path| registry.get_for_file(path))
                .or_else(|| registry.get_by_id(JSON_ADAPTER_ID))
                .ok_or(ConfigError::AdapterResolution)?,
        };

        let config_path = match self.config_path {
            Some(path) => path,
            None => {
                let extension = adapter
                    .extensions()
                    .first()
                    .copied()
                    .unwrap_or_else(|| adapter.id());
                cwd().join(format!("{DEFAULT_CONFIG_BASENAME}.{extension}"))
            }
        };
        let dotenv_path = self
            .dotenv_path
            .unwrap_or_else(|| cwd().join(DEFAULT_DOTENV_FILENAME));
        let environment = self
            .environment
            .unwrap_or_else(|| Box::new(ProcessEnvironment));

        Ok(ConfigLoader {
            schema: self.schema,
            registry,
            adapter,
            config_path,
            create_if_missing: self.create_if_missing,
            use_env_fallback: self.use_env_fallback,
            env_prefix: self.env_prefix,
            use_dotenv: self.use_dotenv,
            dotenv_path,
            environment,
        })
    }
}

fn cwd() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
