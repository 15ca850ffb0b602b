//! Error types for configuration resolution.
//!
//! Responsibilities:
//! - Define the fatal error variants `load()` and `build()` can return.
//!
//! Does NOT handle:
//! - Recoverable conditions (file read/parse, persistence, dotenv); those
//!   are logged warnings inside the loader and never surface as errors.
//!
//! Invariants:
//! - Validation errors carry every issue, rendered one `path: message`
//!   line each.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::IssueList;

/// Errors that can occur during configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No adapter claimed the configured path and no JSON adapter is
    /// registered. Raised at construction time, never from `load()`.
    #[error("No suitable format adapter found for the configuration path")]
    AdapterResolution,

    /// Validation failed with issues the repair pass could not fix.
    #[error("Configuration validation failed:\n{0}")]
    Validation(IssueList),

    /// No file, environment fallback disabled, create-if-missing off:
    /// nothing can satisfy the request.
    #[error(
        "Could not load configuration from {} and no fallback options were available",
        .config_path.display()
    )]
    NoSource { config_path: PathBuf },
}
