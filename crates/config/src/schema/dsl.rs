//! Declarative object schemas.
//!
//! A small builder for the common case: an object of typed fields, some
//! carrying defaults, some optional, nested objects allowed. Unknown keys
//! are stripped from the output rather than rejected, and validation
//! collects every issue instead of stopping at the first.
//!
//! ```
//! use laminate_config::schema::dsl::{object, FieldKind};
//! use laminate_config::Schema;
//! use serde_json::json;
//!
//! let schema = object()
//!     .required("server", object().with_default("port", FieldKind::Integer, json!(3000)))
//!     .with_default("debug", FieldKind::Boolean, json!(false));
//!
//! let resolved = schema.validate(&json!({"server": {"port": 8080}})).unwrap();
//! assert_eq!(resolved, json!({"server": {"port": 8080}, "debug": false}));
//! ```

use serde_json::{Map, Value};

use super::{Issue, IssueKind, Schema};

/// The accepted shape of a single field's value.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Any array; elements are not validated.
    Array,
    /// Accepts any value unchanged.
    Any,
    Object(ObjectSchema),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Any => "any",
            FieldKind::Object(_) => "object",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Any => true,
            FieldKind::Object(_) => value.is_object(),
        }
    }
}

#[derive(Debug, Clone)]
enum Presence {
    Required,
    Optional,
    Default(Value),
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    kind: FieldKind,
    presence: Presence,
}

/// A declarative schema for an object of typed fields.
///
/// Field declaration order is preserved in the canonical output.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

/// Starts an empty object schema.
pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

impl ObjectSchema {
    /// Declares a field that must be present in the candidate.
    pub fn required(mut self, name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind: kind.into(),
            presence: Presence::Required,
        });
        self
    }

    /// Declares a field that may be absent; absent fields are omitted from
    /// the canonical output.
    pub fn optional(mut self, name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind: kind.into(),
            presence: Presence::Optional,
        });
        self
    }

    /// Declares a field filled from `default` when absent.
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        kind: impl Into<FieldKind>,
        default: Value,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind: kind.into(),
            presence: Presence::Default(default),
        });
        self
    }

    fn validate_at(
        &self,
        candidate: &Value,
        path: &mut Vec<String>,
        issues: &mut Vec<Issue>,
    ) -> Value {
        let Some(map) = candidate.as_object() else {
            issues.push(Issue::new(
                path.clone(),
                IssueKind::InvalidType,
                format!("expected object, received {}", type_name(candidate)),
            ));
            return Value::Object(Map::new());
        };

        let mut out = Map::new();
        for field in &self.fields {
            path.push(field.name.clone());
            match map.get(&field.name) {
                None => match &field.presence {
                    Presence::Default(default) => {
                        out.insert(field.name.clone(), default.clone());
                    }
                    Presence::Optional => {}
                    Presence::Required => {
                        issues.push(Issue::new(
                            path.clone(),
                            IssueKind::MissingField,
                            "required field is missing",
                        ));
                    }
                },
                Some(value) => {
                    if let FieldKind::Object(inner) = &field.kind {
                        if value.is_object() {
                            let validated = inner.validate_at(value, path, issues);
                            out.insert(field.name.clone(), validated);
                        } else {
                            issues.push(Issue::new(
                                path.clone(),
                                IssueKind::InvalidType,
                                format!("expected object, received {}", type_name(value)),
                            ));
                        }
                    } else if field.kind.accepts(value) {
                        out.insert(field.name.clone(), value.clone());
                    } else {
                        issues.push(Issue::new(
                            path.clone(),
                            IssueKind::InvalidType,
                            format!(
                                "expected {}, received {}",
                                field.kind.expected(),
                                type_name(value)
                            ),
                        ));
                    }
                }
            }
            path.pop();
        }
        Value::Object(out)
    }
}

impl From<ObjectSchema> for FieldKind {
    fn from(schema: ObjectSchema) -> Self {
        FieldKind::Object(schema)
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, candidate: &Value) -> Result<Value, Vec<Issue>> {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        let canonical = self.validate_at(candidate, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(canonical)
        } else {
            Err(issues)
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
