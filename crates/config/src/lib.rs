//! Layered configuration resolution for services and tools.
//!
//! This crate resolves application configuration from a persisted file,
//! process environment variables, and schema-declared defaults into a single
//! validated tree plus per-leaf provenance. Sources are attempted in a fixed
//! order (file, then environment, then defaults) with no merging across
//! sources; configuration files written against an older schema are repaired
//! by back-filling newly required, default-bearing fields.

pub mod adapter;
pub mod constants;
pub mod env;
mod loader;
pub mod paths;
pub mod schema;
mod source;

pub use adapter::{AdapterError, AdapterRegistry, FormatAdapter, JsonAdapter, YamlAdapter};
pub use env::{Environment, EnvironmentIngester, MapEnvironment, ProcessEnvironment};
pub use loader::{ConfigError, ConfigLoader, ConfigResult, LoaderBuilder, repair};
pub use schema::{Issue, IssueKind, IssueList, Schema};
pub use source::Source;
