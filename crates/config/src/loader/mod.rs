//! Configuration resolution orchestration.
//!
//! Responsibilities:
//! - Resolve options and the format adapter once, at construction
//!   (`LoaderBuilder`).
//! - Run the fixed-precedence `load()` state machine: dotenv bootstrap,
//!   file, environment fallback, schema defaults, optional persistence.
//! - Repair validation failures caused only by newly required,
//!   default-bearing fields (`repair`).
//!
//! Does NOT handle:
//! - Format transcoding (see `adapter`).
//! - Environment scanning and coercion (see `env`).
//! - Schema semantics (see `schema`).
//!
//! Invariants:
//! - Sources are attempted in order file, environment, defaults, with no
//!   merging across sources; the first validated branch wins.
//! - A file that exists and parses is authoritative: the environment and
//!   defaults are never consulted, even when validation required repair.
//! - Recoverable failures (file read/parse, persistence, dotenv) are logged
//!   warnings; `load()` itself fails only on fatal validation issues or
//!   when no source can satisfy the request.

mod builder;
mod engine;
mod error;
mod repair;
mod result;

#[cfg(test)]
mod tests;

pub use builder::LoaderBuilder;
pub use engine::ConfigLoader;
pub use error::ConfigError;
pub use repair::repair;
pub use result::ConfigResult;
