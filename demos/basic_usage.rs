// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the layercfg crate.
//!
//! This example demonstrates:
//! - Setting defaults and overrides
//! - Loading a configuration file from a search path
//! - Nested keys, aliases and typed accessors
//! - Decoding a section into a struct
//!
//! To run this example:
//! ```bash
//! # Optionally point it at a directory holding a config.yaml / config.toml / config.json
//! export LAYERCFG_DEMO_DIR=/etc/myapp
//!
//! cargo run --example basic_usage
//! ```

use layercfg::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== layercfg: Basic Usage ===\n");

    let mut builder = LayeredConfig::builder().config_name("config");
    if let Ok(dir) = std::env::var("LAYERCFG_DEMO_DIR") {
        builder = builder.add_config_path(dir);
    }
    let mut config = builder.add_config_path(".").build()?;

    // Example 1: Defaults
    println!("--- Example 1: Defaults ---");
    config.set_default("app.name", "DefaultApp");
    config.set_default(
        "database",
        ConfigValue::Map(
            [
                ("host".to_string(), ConfigValue::from("localhost")),
                ("port".to_string(), ConfigValue::from(5432)),
            ]
            .into_iter()
            .collect(),
        ),
    );
    config.set_default("request.timeout", "30s");
    println!("app.name = {}", config.get_string("app.name"));

    // Example 2: Loading a file
    println!("\n--- Example 2: Config File ---");
    match config.read_in_config() {
        Ok(()) => println!("✓ Loaded {:?}", config.config_file_used()),
        Err(e) => println!("✗ No config file loaded: {}", e),
    }

    // Example 3: Overrides always win
    println!("\n--- Example 3: Overrides ---");
    config.set("app.name", "OverriddenApp");
    println!("app.name = {}", config.get_string("app.name"));

    // Example 4: Typed accessors
    println!("\n--- Example 4: Typed Values ---");
    println!("database.port = {} (as i64)", config.get_int("database.port"));
    println!(
        "request.timeout = {:?} (as Duration)",
        config.get_duration("request.timeout")
    );

    // Example 5: Aliases
    println!("\n--- Example 5: Aliases ---");
    config.register_alias("db_host", "database.host");
    println!("db_host = {}", config.get_string("db_host"));

    // Example 6: Decoding
    println!("\n--- Example 6: Decoding ---");
    let database: Database = config.unmarshal_key("database")?;
    println!("✓ Decoded: {:?}", database);

    println!("\n--- Example 7: Everything ---");
    for key in config.all_keys() {
        println!("  {} = {:?}", key, config.get(key.as_str()));
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
