//! Tests for the resolution engine.
//!
//! Responsibilities:
//! - Test each branch of the `load()` state machine (file, environment,
//!   defaults, no-source).
//! - Test adapter resolution at construction time.
//! - Test dotenv bootstrap behavior.
//!
//! Does NOT handle:
//! - Path codec details (tested in `paths`).
//! - Schema semantics (tested in `schema::dsl`).
//!
//! Invariants:
//! - Tests touching the process environment or dotenv use `serial_test`
//!   plus `env_lock()` to prevent cross-test contamination; everything else
//!   runs against injected `MapEnvironment`s and explicit temp paths.

use std::sync::Mutex;

use serde_json::json;

use crate::schema::dsl::{FieldKind, ObjectSchema, object};

pub mod defaults_tests;

/// Returns the global test lock for process-environment isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// The schema most loader tests resolve against: a required `server`
/// object with a defaulted port, and a required `logging` object with a
/// defaulted level.
pub fn service_schema() -> ObjectSchema {
    object()
        .required(
            "server",
            object().with_default("port", FieldKind::Integer, json!(3000)),
        )
        .required(
            "logging",
            object().with_default("level", FieldKind::String, json!("info")),
        )
}
