//! Provenance tags for resolved configuration values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The origin of a resolved configuration leaf.
///
/// Serialized as a lowercase string (`"file"`, `"env"`, `"default"`);
/// `Custom` tags round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    File,
    Env,
    Default,
    /// Arbitrary provenance tag for custom sources.
    Custom(String),
}

impl Source {
    /// The string form used in serialized `sources` maps.
    pub fn as_str(&self) -> &str {
        match self {
            Source::File => "file",
            Source::Env => "env",
            Source::Default => "default",
            Source::Custom(tag) => tag,
        }
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.as_str() {
            "file" => Source::File,
            "env" => Source::Env,
            "default" => Source::Default,
            _ => Source::Custom(value),
        }
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
