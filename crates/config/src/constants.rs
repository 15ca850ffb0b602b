//! Centralized constants for the laminate workspace.
//!
//! This module contains default values used across the crate to avoid
//! magic value duplication and improve maintainability.

// =============================================================================
// Resolution Defaults
// =============================================================================

/// Default basename for a freshly created configuration file; the extension
/// comes from the resolved format adapter.
pub const DEFAULT_CONFIG_BASENAME: &str = "config";

/// Default dotenv file name, resolved relative to the current directory.
pub const DEFAULT_DOTENV_FILENAME: &str = ".env";

/// Default environment variable prefix (empty: every variable matches).
pub const DEFAULT_ENV_PREFIX: &str = "";

// =============================================================================
// Adapter Identifiers
// =============================================================================

/// Identifier of the built-in JSON adapter, also the final fallback during
/// adapter resolution.
pub const JSON_ADAPTER_ID: &str = "json";

/// Identifier of the built-in YAML adapter.
pub const YAML_ADAPTER_ID: &str = "yaml";
