// SPDX-License-Identifier: MIT OR Apache-2.0

//! A layered, case-insensitive configuration store.
//!
//! This crate holds configuration values from sources of differing precedence and
//! answers key lookups by resolving across them. Explicit runtime overrides win over
//! a loaded configuration file, which wins over application defaults. Dotted keys
//! reach into nested tables, aliases let one key name stand in for another, and
//! every read is coerced to a type compatible with what the caller asked for.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and conversion rules (`ConfigKey`, `ConfigValue`,
//!   the `cast` policy, errors and the `ConfigurationService` accessor trait)
//! - **Ports**: Trait definitions that define interfaces (`ConfigParser`)
//! - **Adapters**: File format parsers, file location and structured decoding
//! - **Service**: The layered store, alias table and lookup engine that tie
//!   everything together
//!
//! # Features
//!
//! - **Precedence**: overrides > config file > defaults, never merged per key
//! - **Nested Keys**: `database.host` descends into a `database` table
//! - **Aliases**: rename a setting without breaking callers of the old name
//! - **Lenient Reads**: mistyped or missing values degrade to the zero value
//! - **Structured Decoding**: deserialize settings into your own types with serde
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `toml`: Enable TOML file support (default)
//! - `json`: Enable JSON file support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use layercfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut config = LayeredConfig::new();
//! config.set_default("server.port", 8080);
//! config.set_default("server.timeout", "30s");
//! config.read_config("{\"server\": {\"port\": 9000}}", "json")?;
//!
//! assert_eq!(config.get_int("server.port"), 9000);
//! assert_eq!(config.get_duration("server.timeout").as_secs(), 30);
//! # Ok(())
//! # }
//! ```
//!
//! Loading from disk searches each config path for `<name>.<ext>`:
//!
//! ```rust,no_run
//! use layercfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut config = LayeredConfig::builder()
//!     .config_name("myapp")
//!     .add_config_path("/etc/myapp")
//!     .add_config_path("$HOME/.myapp")
//!     .build()?;
//! config.read_in_config()?;
//! println!("loaded {:?}", config.config_file_used());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result, ValueKind, ValueMap,
    };
    pub use crate::ports::ConfigParser;
    pub use crate::service::{LayeredConfig, LayeredConfigBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonParser;
    #[cfg(feature = "toml")]
    pub use crate::adapters::TomlParser;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
