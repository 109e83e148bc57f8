// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! parsing configuration files in different formats (YAML, TOML, JSON, etc.).

use crate::domain::{Result, ValueMap};

/// A trait for parsing configuration files.
///
/// Parsers turn the text of a configuration file into the nested value model.
/// Nested tables stay nested: a YAML document like
///
/// ```yaml
/// database:
///   host: localhost
///   port: 5432
/// ```
///
/// parses into a mapping whose `database` entry is itself a mapping holding `host`
/// and `port`. Null entries are dropped.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigValue, Result, ValueMap};
/// use layercfg::ports::ConfigParser;
///
/// struct KeyEqualsValue;
///
/// impl ConfigParser for KeyEqualsValue {
///     fn parse(&self, content: &str) -> Result<ValueMap> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), ConfigValue::from(v.trim())))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["kv"]
///     }
/// }
///
/// let parsed = KeyEqualsValue.parse("name = demo").unwrap();
/// assert_eq!(parsed.get("name"), Some(&ConfigValue::from("demo")));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a mapping of top-level keys to values.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw content of the configuration file
    ///
    /// # Returns
    ///
    /// * `Ok(ValueMap)` - The parsed configuration
    /// * `Err(ConfigError::ParseError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<ValueMap>;

    /// Returns the file extensions supported by this parser.
    ///
    /// Extensions are lowercase and carry no leading dot. They double as the format
    /// names accepted by an explicit config type.
    fn supported_extensions(&self) -> &[&str];

    /// Reports whether this parser handles `config_type`, ignoring case.
    fn supports(&self, config_type: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(config_type))
    }
}
