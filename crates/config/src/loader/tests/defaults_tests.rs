//! Tests for the defaults branch and the no-source failure.
//!
//! Responsibilities:
//! - Test bootstrap-from-nothing: defaults resolved, persisted, and tagged.
//! - Test that a second load reads the freshly written file back.
//! - Test the fatal no-source error when every branch is disabled.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::service_schema;
use crate::env::MapEnvironment;
use crate::loader::{ConfigError, ConfigLoader};
use crate::source::Source;

fn bootstrap_loader(
    config_path: &std::path::Path,
    create_if_missing: bool,
) -> ConfigLoader<crate::schema::dsl::ObjectSchema> {
    ConfigLoader::builder(service_schema())
        .with_config_path(config_path)
        .with_env_fallback(false)
        .with_dotenv(false)
        .with_create_if_missing(create_if_missing)
        .with_environment(MapEnvironment::new())
        .build()
        .unwrap()
}

#[test]
fn test_bootstrap_from_nothing_uses_schema_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    let result = bootstrap_loader(&config_path, true).load().unwrap();

    assert_eq!(
        result.config,
        json!({"server": {"port": 3000}, "logging": {"level": "info"}})
    );
    assert!(result.sources.values().all(|s| *s == Source::Default));
    assert_eq!(result.config_path.as_deref(), Some(config_path.as_path()));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(written, result.config);
}

#[test]
fn test_second_load_reads_the_written_file_back_as_file_source() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    let first = bootstrap_loader(&config_path, true).load().unwrap();
    let second = bootstrap_loader(&config_path, true).load().unwrap();

    assert_eq!(second.config, first.config);
    assert!(second.sources.values().all(|s| *s == Source::File));
}

#[test]
fn test_nested_config_path_directories_are_created() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("deep").join("nested").join("config.json");

    let result = bootstrap_loader(&config_path, true).load().unwrap();

    assert!(config_path.exists());
    assert_eq!(result.config_path.as_deref(), Some(config_path.as_path()));
}

#[test]
fn test_no_source_available_is_fatal_and_names_the_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    match bootstrap_loader(&config_path, false).load() {
        Err(ConfigError::NoSource { config_path: path }) => {
            assert_eq!(path, config_path);
        }
        other => panic!("expected no-source error, got {other:?}"),
    }

    let message = bootstrap_loader(&config_path, false)
        .load()
        .unwrap_err()
        .to_string();
    assert!(message.contains(&config_path.display().to_string()));
}
