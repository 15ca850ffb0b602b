//! Schema evolution: a config file written against an older schema is
//! repaired by back-filling newly added, default-bearing sections.
//!
//! ```sh
//! cargo run --example schema_evolution
//! ```

use std::fs;

use serde_json::json;

use laminate_config::schema::dsl::{FieldKind, object};
use laminate_config::ConfigLoader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("laminate-evolution");
    fs::create_dir_all(&dir)?;
    let config_path = dir.join("config.json");

    // Simulate a file produced by version 1 of the application, before the
    // `metrics` section existed.
    fs::write(&config_path, r#"{"server": {"port": 8080}}"#)?;

    // Version 2's schema requires a metrics section with defaults.
    let schema = object()
        .required(
            "server",
            object().with_default("port", FieldKind::Integer, json!(3000)),
        )
        .required(
            "metrics",
            object()
                .with_default("enabled", FieldKind::Boolean, json!(true))
                .with_default("interval", FieldKind::Integer, json!(60)),
        );

    let loader = ConfigLoader::builder(schema)
        .with_config_path(&config_path)
        .build()?;

    let result = loader.load()?;

    println!("old file:      {}", fs::read_to_string(&config_path)?.trim());
    println!(
        "resolved tree: {}",
        serde_json::to_string(&result.config)?
    );
    println!();
    println!("the user's port survived; the new section came from defaults");

    Ok(())
}
