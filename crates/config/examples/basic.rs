//! Basic usage: resolve a configuration with file, environment, and
//! default sources, then inspect per-leaf provenance.
//!
//! ```sh
//! cargo run --example basic
//! ```

use serde_json::json;

use laminate_config::schema::dsl::{FieldKind, object};
use laminate_config::ConfigLoader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = object()
        .required(
            "server",
            object()
                .with_default("port", FieldKind::Integer, json!(3000))
                .with_default("host", FieldKind::String, json!("localhost")),
        )
        .required(
            "logging",
            object().with_default("level", FieldKind::String, json!("info")),
        );

    let loader = ConfigLoader::builder(schema)
        .with_config_path(std::env::temp_dir().join("laminate-basic").join("config.json"))
        .build()?;

    let result = loader.load()?;

    println!("resolved configuration:");
    println!("{}", serde_json::to_string_pretty(&result.config)?);
    println!();
    println!("provenance:");
    for (path, source) in &result.sources {
        println!("  {path}: {source}");
    }
    if let Some(path) = &result.config_path {
        println!();
        println!("backed by: {}", path.display());
    }

    Ok(())
}
