//! Built-in JSON format adapter.

use serde_json::Value;

use super::{AdapterError, FormatAdapter};
use crate::constants::JSON_ADAPTER_ID;

/// Reads and writes standard JSON; writes are pretty-printed with 2-space
/// indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl FormatAdapter for JsonAdapter {
    fn id(&self) -> &str {
        JSON_ADAPTER_ID
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, text: &str) -> Result<Value, AdapterError> {
        serde_json::from_str(text).map_err(|e| AdapterError::Parse {
            format: "JSON",
            source: Box::new(e),
        })
    }

    fn stringify(&self, tree: &Value) -> Result<String, AdapterError> {
        serde_json::to_string_pretty(tree).map_err(|e| AdapterError::Serialize {
            format: "JSON",
            source: Box::new(e),
        })
    }
}
