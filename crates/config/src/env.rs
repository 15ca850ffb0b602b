//! Environment variable ingestion for configuration.
//!
//! Responsibilities:
//! - Scan an environment for prefixed variables and convert them into a
//!   nested candidate tree with best-effort type coercion.
//! - Provide the injectable `Environment` seam so ingestion is testable
//!   against synthetic environments.
//! - Provide single-key lookup with a default fallback.
//!
//! Does NOT handle:
//! - `.env` file loading (see `loader`, which bootstraps the process
//!   environment before ingestion).
//! - Validation of the produced candidate (see `schema`).
//!
//! Invariants:
//! - Prefix matching is a case-sensitive `starts_with` on the raw variable
//!   name; no separator is required between prefix and remainder.
//! - Key mangling lowercases the remainder and uppercases single ASCII
//!   letters following `_`; it does not reconstruct dotted paths, so each
//!   variable yields one top-level key.
//! - Every ingested key is tagged `Source::Env`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::paths::{self, unflatten};
use crate::source::Source;

/// A key/value view of an environment.
///
/// Injected into [`EnvironmentIngester`] instead of reading ambient global
/// state directly, so resolution logic can run against synthetic
/// environments in tests.
pub trait Environment {
    /// Every name/value pair, in unspecified order.
    fn vars(&self) -> Vec<(String, String)>;

    /// Looks a single variable up by its exact name.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }

    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed in-memory environment for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: BTreeMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// The flat keys and provenance produced by one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct IngestedEnv {
    /// Coerced values keyed by the mangled flat key.
    pub flat: BTreeMap<String, Value>,
    /// `Source::Env` for every key in `flat`.
    pub sources: BTreeMap<String, Source>,
}

impl IngestedEnv {
    /// The nested candidate tree for validation.
    pub fn candidate(&self) -> Value {
        unflatten(&self.flat)
    }

    /// Whether the given flat config path was covered by an ingested key:
    /// either exactly, or by an ingested key carrying a composite value
    /// whose leaves live below it.
    pub fn covers(&self, leaf_path: &str) -> bool {
        self.flat.keys().any(|key| {
            leaf_path == key
                || (leaf_path.len() > key.len()
                    && leaf_path.starts_with(key)
                    && leaf_path.as_bytes()[key.len()] == b'.')
        })
    }
}

/// Scans an [`Environment`] for prefixed variables and converts them into
/// configuration keys.
pub struct EnvironmentIngester<'a> {
    environment: &'a dyn Environment,
    prefix: &'a str,
}

impl<'a> EnvironmentIngester<'a> {
    pub fn new(environment: &'a dyn Environment, prefix: &'a str) -> Self {
        Self {
            environment,
            prefix,
        }
    }

    /// Ingests every variable whose raw name starts with the prefix.
    pub fn ingest(&self) -> IngestedEnv {
        let mut ingested = IngestedEnv::default();
        for (name, raw) in self.environment.vars() {
            let Some(rest) = name.strip_prefix(self.prefix) else {
                continue;
            };
            let key = mangle_key(rest);
            ingested.sources.insert(key.clone(), Source::Env);
            ingested.flat.insert(key, coerce(&raw));
        }
        ingested
    }

    /// Looks a single dot-path up under the ingester's prefix, following the
    /// `PREFIX_UPPER_SNAKE` naming convention.
    ///
    /// Returns the coerced value tagged `Source::Env` when the variable is
    /// set, otherwise the provided default tagged `Source::Default`.
    pub fn lookup(&self, path: &str, default: Option<Value>) -> (Option<Value>, Source) {
        let prefix = (!self.prefix.is_empty()).then_some(self.prefix);
        let name = paths::to_env_var_name(path, prefix);
        match self.environment.get(&name) {
            Some(raw) => (Some(coerce(&raw)), Source::Env),
            None => match default {
                Some(value) => (Some(value), Source::Default),
                None => (None, Source::Env),
            },
        }
    }
}

/// Lowercases the remainder and uppercases single ASCII letters following
/// `_`. An underscore not followed by a lowercase letter is kept verbatim.
fn mangle_key(rest: &str) -> String {
    let lowered = rest.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '_'
            && i + 1 < chars.len()
            && chars[i + 1].is_ascii_lowercase()
        {
            out.push(chars[i + 1].to_ascii_uppercase());
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Best-effort coercion of a raw environment string.
///
/// Strings shaped like objects or arrays, the literals `true`/`false`, and
/// fully numeric strings are attempted as JSON; anything else, or a failed
/// parse, keeps the raw string.
fn coerce(raw: &str) -> Value {
    let looks_like_json = (raw.starts_with('{') && raw.ends_with('}'))
        || (raw.starts_with('[') && raw.ends_with(']'))
        || raw == "true"
        || raw == "false"
        || raw.trim().parse::<f64>().is_ok();

    if looks_like_json {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ingest(prefix: &str, vars: &[(&str, &str)]) -> IngestedEnv {
        let environment: MapEnvironment = vars.iter().copied().collect();
        EnvironmentIngester::new(&environment, prefix).ingest()
    }

    #[test]
    fn test_prefix_with_separator_yields_camel_case_key() {
        let ingested = ingest("APP_", &[("APP_SERVER_PORT", "3000")]);

        assert_eq!(ingested.flat.get("serverPort"), Some(&json!(3000)));
        assert_eq!(ingested.sources.get("serverPort"), Some(&Source::Env));
    }

    #[test]
    fn test_prefix_without_separator_produces_pascal_case_key() {
        // The raw prefix match keeps the separator in the remainder, so the
        // first letter is uppercased rather than producing a dotted path.
        let ingested = ingest("APP", &[("APP_SERVER_PORT", "3000")]);

        assert_eq!(ingested.flat.get("ServerPort"), Some(&json!(3000)));
    }

    #[test]
    fn test_non_matching_names_are_skipped() {
        let ingested = ingest("APP_", &[("OTHER_PORT", "1"), ("app_port", "2")]);
        assert!(ingested.flat.is_empty());
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let ingested = ingest("", &[("PORT", "8080")]);
        assert_eq!(ingested.flat.get("port"), Some(&json!(8080)));
    }

    #[test]
    fn test_coercion_of_booleans_numbers_and_json() {
        let ingested = ingest(
            "APP_",
            &[
                ("APP_DEBUG", "true"),
                ("APP_PORT", "3000"),
                ("APP_RATIO", "0.5"),
                ("APP_TAGS", r#"["a","b"]"#),
                ("APP_LIMITS", r#"{"max":10}"#),
                ("APP_NAME", "laminate"),
            ],
        );

        assert_eq!(ingested.flat.get("debug"), Some(&json!(true)));
        assert_eq!(ingested.flat.get("port"), Some(&json!(3000)));
        assert_eq!(ingested.flat.get("ratio"), Some(&json!(0.5)));
        assert_eq!(ingested.flat.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(ingested.flat.get("limits"), Some(&json!({"max": 10})));
        assert_eq!(ingested.flat.get("name"), Some(&json!("laminate")));
    }

    #[test]
    fn test_malformed_json_like_values_keep_raw_string() {
        let ingested = ingest("APP_", &[("APP_BAD", "{not json}")]);
        assert_eq!(ingested.flat.get("bad"), Some(&json!("{not json}")));
    }

    #[test]
    fn test_numeric_looking_but_invalid_json_keeps_raw_string() {
        // `inf` parses as f64 but is not valid JSON, so the raw string wins.
        let ingested = ingest("APP_", &[("APP_X", "inf")]);
        assert_eq!(ingested.flat.get("x"), Some(&json!("inf")));
    }

    #[test]
    fn test_candidate_keys_stay_top_level() {
        let ingested = ingest("APP_", &[("APP_SERVER_PORT", "3000")]);
        assert_eq!(ingested.candidate(), json!({"serverPort": 3000}));
    }

    #[test]
    fn test_covers_exact_and_dot_prefixed_paths() {
        let ingested = ingest("APP_", &[("APP_LIMITS", r#"{"max":10}"#)]);

        assert!(ingested.covers("limits"));
        assert!(ingested.covers("limits.max"));
        assert!(!ingested.covers("limitsOther"));
        assert!(!ingested.covers("max"));
    }

    #[test]
    #[serial_test::serial]
    fn test_process_environment_reads_real_variables() {
        let _lock = crate::test_util::global_test_lock().lock().unwrap();
        temp_env::with_var("LAMINATE_ENV_PROBE", Some("42"), || {
            let environment = ProcessEnvironment;
            assert_eq!(environment.get("LAMINATE_ENV_PROBE").as_deref(), Some("42"));
            assert!(
                environment
                    .vars()
                    .iter()
                    .any(|(name, value)| name == "LAMINATE_ENV_PROBE" && value == "42")
            );
        });
    }

    #[test]
    fn test_lookup_prefers_env_over_default() {
        let environment = MapEnvironment::new()
            .set("APP_DATABASE_HOST", "db.internal")
            .set("APP_DATABASE_PORT", "5432");
        let ingester = EnvironmentIngester::new(&environment, "APP");

        let (value, source) = ingester.lookup("database.host", Some(json!("localhost")));
        assert_eq!(value, Some(json!("db.internal")));
        assert_eq!(source, Source::Env);

        let (value, source) = ingester.lookup("database.name", Some(json!("app")));
        assert_eq!(value, Some(json!("app")));
        assert_eq!(source, Source::Default);

        let (value, _) = ingester.lookup("database.port", None);
        assert_eq!(value, Some(json!(5432)));
    }
}
