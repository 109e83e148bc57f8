// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing file format parsers and file handling.
//!
//! This module contains concrete implementations of the `ConfigParser` trait
//! defined in the ports layer, one per supported file format, together with the
//! file locator and the decoder used by `unmarshal`.

pub mod decode;
pub mod file_locator;
#[cfg(feature = "json")]
pub mod json_parser;
#[cfg(feature = "toml")]
pub mod toml_parser;
#[cfg(feature = "yaml")]
pub mod yaml_parser;

pub use file_locator::ConfigFileLocator;
#[cfg(feature = "json")]
pub use json_parser::JsonParser;
#[cfg(feature = "toml")]
pub use toml_parser::TomlParser;
#[cfg(feature = "yaml")]
pub use yaml_parser::YamlParser;

use crate::ports::ConfigParser;

/// Returns one parser for every format enabled at compile time.
#[allow(clippy::vec_init_then_push)]
pub fn default_parsers() -> Vec<Box<dyn ConfigParser>> {
    let mut parsers: Vec<Box<dyn ConfigParser>> = Vec::new();
    #[cfg(feature = "yaml")]
    parsers.push(Box::new(YamlParser::new()));
    #[cfg(feature = "toml")]
    parsers.push(Box::new(TomlParser::new()));
    #[cfg(feature = "json")]
    parsers.push(Box::new(JsonParser::new()));
    parsers
}
