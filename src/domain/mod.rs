// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and conversion rules.
//!
//! This module contains the key and value model, the best-effort cast policy and
//! the read-side service trait. It is independent of any file format or storage
//! concern.

pub mod cast;
pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod service;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::{ConfigValue, ValueKind, ValueMap};
pub use errors::{CastError, ConfigError, Result};
pub use service::ConfigurationService;
