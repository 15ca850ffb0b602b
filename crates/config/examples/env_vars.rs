//! Environment-variable fallback: resolve configuration from prefixed
//! variables when no file exists.
//!
//! ```sh
//! DEMO_SERVER_PORT=8080 DEMO_DEBUG=true cargo run --example env_vars
//! ```

use serde_json::json;

use laminate_config::schema::dsl::{FieldKind, object};
use laminate_config::ConfigLoader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Key mangling lowercases the remainder after the prefix and
    // camel-cases single letters after underscores: DEMO_SERVER_PORT
    // becomes the top-level key `serverPort`.
    let schema = object()
        .with_default("serverPort", FieldKind::Integer, json!(3000))
        .with_default("debug", FieldKind::Boolean, json!(false));

    let loader = ConfigLoader::builder(schema)
        .with_config_path(std::env::temp_dir().join("laminate-env").join("config.json"))
        .with_env_prefix("DEMO_")
        .with_create_if_missing(false)
        .build()?;

    let result = loader.load()?;

    println!("resolved configuration:");
    println!("{}", serde_json::to_string_pretty(&result.config)?);
    println!();
    for (path, source) in &result.sources {
        println!("  {path} came from {source}");
    }

    Ok(())
}
