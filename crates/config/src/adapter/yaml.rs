//! Built-in YAML format adapter.

use serde_json::Value;

use super::{AdapterError, FormatAdapter};
use crate::constants::YAML_ADAPTER_ID;

/// Reads and writes standard YAML; writes use 2-space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlAdapter;

impl FormatAdapter for YamlAdapter {
    fn id(&self) -> &str {
        YAML_ADAPTER_ID
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, text: &str) -> Result<Value, AdapterError> {
        serde_yaml::from_str(text).map_err(|e| AdapterError::Parse {
            format: "YAML",
            source: Box::new(e),
        })
    }

    fn stringify(&self, tree: &Value) -> Result<String, AdapterError> {
        serde_yaml::to_string(tree).map_err(|e| AdapterError::Serialize {
            format: "YAML",
            source: Box::new(e),
        })
    }
}
