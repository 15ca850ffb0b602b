//! Schema-evolution repair.
//!
//! Responsibilities:
//! - Salvage validation failures caused only by newly required,
//!   default-bearing fields: back-fill the missing paths and re-validate
//!   exactly once.
//!
//! Does NOT handle:
//! - Any other issue kind; a single type or value error aborts resolution.
//!
//! Invariants:
//! - `repair` is a pure function over its inputs; the candidate is never
//!   mutated.
//! - There is no fixpoint loop: one repair pass, one re-validation.

use serde_json::{Map, Value};

use super::error::ConfigError;
use crate::schema::{Issue, IssueKind, Schema};

/// Validates `candidate`, repairing missing-required-field failures from the
/// schema's defaults before giving up.
///
/// Any issue other than a missing field is fatal immediately; a repaired
/// tree that still fails validation is fatal with the new issues.
pub(crate) fn validate_with_repair<S: Schema>(
    schema: &S,
    candidate: &Value,
) -> Result<Value, ConfigError> {
    let issues = match schema.validate(candidate) {
        Ok(resolved) => return Ok(resolved),
        Err(issues) => issues,
    };

    if issues.iter().any(|i| i.kind != IssueKind::MissingField) {
        return Err(ConfigError::Validation(issues.into()));
    }

    // Best-effort: a schema that cannot satisfy itself from defaults still
    // gets empty containers at the missing paths.
    let defaults = schema.defaults();
    let repaired = repair(candidate, &issues, defaults.as_ref());

    schema
        .validate(&repaired)
        .map_err(|issues| ConfigError::Validation(issues.into()))
}

/// Back-fills every missing-field issue path in `candidate`.
///
/// Intermediate containers are created on demand without overwriting
/// existing non-null containers. The defaults instance is walked in
/// parallel along each path; when a segment is absent there, the terminal
/// field falls back to an empty container so nested defaults can apply on
/// re-validation.
pub fn repair(candidate: &Value, issues: &[Issue], defaults: Option<&Value>) -> Value {
    let mut working = if candidate.is_object() {
        candidate.clone()
    } else {
        Value::Object(Map::new())
    };

    'issues: for issue in issues.iter().filter(|i| i.kind == IssueKind::MissingField) {
        let Some((last, parents)) = issue.path.split_last() else {
            continue;
        };

        let mut cursor = &mut working;
        let mut default_cursor = defaults;
        for segment in parents {
            let Some(map) = cursor.as_object_mut() else {
                // A scalar in the way; this path cannot be repaired.
                continue 'issues;
            };
            let slot = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if slot.is_null() {
                *slot = Value::Object(Map::new());
            }
            cursor = slot;
            default_cursor = default_cursor.and_then(|d| d.get(segment));
        }

        let Some(map) = cursor.as_object_mut() else {
            continue;
        };
        if !map.contains_key(last) {
            let fill = default_cursor
                .and_then(|d| d.get(last))
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            map.insert(last.clone(), fill);
        }
    }

    working
}
