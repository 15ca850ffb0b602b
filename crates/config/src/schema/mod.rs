//! The validation capability consumed by the loader.
//!
//! Responsibilities:
//! - Define the `Schema` seam: validate a candidate tree into a canonical
//!   result, or report every issue found as structured data.
//! - Define the issue model (`Issue`, `IssueKind`, `IssueList`).
//! - Ship a declarative object-schema implementation (`dsl`).
//!
//! Does NOT handle:
//! - Source precedence or repair (see `loader`); the repair algorithm is a
//!   consumer of the issue list, not part of validation.
//!
//! Invariants:
//! - Validation is exhaustive: every issue in the candidate is reported,
//!   not just the first.
//! - `defaults()` is best-effort: a schema whose required fields have no
//!   defaults yields `None`, and callers must tolerate that.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod dsl;

/// Classification of a single validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field is absent from the candidate. The only kind the
    /// repair pass is allowed to fix.
    MissingField,
    /// A value is present but has the wrong type.
    InvalidType,
    /// A value has the right type but an unacceptable content.
    InvalidValue,
}

/// A single structured validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Key path from the root to the offending field.
    pub path: Vec<String>,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn new(path: Vec<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// The dot-joined form of the path, as rendered in error output.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

/// An aggregated list of issues, rendered one `path: message` line each.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueList(pub Vec<Issue>);

impl fmt::Display for IssueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl From<Vec<Issue>> for IssueList {
    fn from(issues: Vec<Issue>) -> Self {
        Self(issues)
    }
}

/// An opaque validation capability.
///
/// Given a candidate tree, a schema either produces the canonical result
/// (defaults applied, unknown keys stripped) or every issue it found. The
/// loader depends only on this trait, so alternate validation backends can
/// be substituted without touching resolution.
pub trait Schema {
    /// Validate `candidate`, returning the canonical tree or all issues.
    fn validate(&self, candidate: &Value) -> Result<Value, Vec<Issue>>;

    /// The all-defaults instance, produced by validating an empty object.
    ///
    /// Returns `None` when the schema cannot satisfy itself from defaults
    /// alone.
    fn defaults(&self) -> Option<Value> {
        self.validate(&Value::Object(Map::new())).ok()
    }
}

impl<S: Schema + ?Sized> Schema for &S {
    fn validate(&self, candidate: &Value) -> Result<Value, Vec<Issue>> {
        (**self).validate(candidate)
    }
}
