// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML configuration parser.

use crate::domain::{cast, ConfigError, ConfigValue, Result, ValueMap};
use crate::ports::ConfigParser;

/// TOML parser implementation.
///
/// Tables stay nested and arrays become [`ConfigValue::List`]. Offset date-times
/// become [`ConfigValue::Time`]; local dates and times that carry no offset are
/// read as UTC when possible and kept as strings otherwise.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::TomlParser;
/// use layercfg::domain::ConfigValue;
/// use layercfg::ports::ConfigParser;
///
/// let parsed = TomlParser::new().parse("[server]\nport = 8080").unwrap();
/// let server = parsed.get("server").and_then(ConfigValue::as_map).unwrap();
/// assert_eq!(server.get("port"), Some(&ConfigValue::from(8080)));
/// ```
#[derive(Debug, Clone)]
pub struct TomlParser;

impl TomlParser {
    /// Creates a new TOML parser.
    pub fn new() -> Self {
        TomlParser
    }

    fn convert(value: toml::Value) -> ConfigValue {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(dt) => {
                let rendered = ConfigValue::String(dt.to_string());
                match cast::try_to_time(&rendered) {
                    Ok(time) => ConfigValue::Time(time),
                    Err(_) => rendered,
                }
            }
            toml::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(Self::convert).collect())
            }
            toml::Value::Table(table) => ConfigValue::Map(Self::convert_table(table)),
        }
    }

    fn convert_table(table: toml::Table) -> ValueMap {
        table
            .into_iter()
            .map(|(k, v)| (k, Self::convert(v)))
            .collect()
    }
}

impl Default for TomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for TomlParser {
    fn parse(&self, content: &str) -> Result<ValueMap> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse TOML: {}", e),
                source: Some(Box::new(e)),
            })?;
        Ok(Self::convert_table(table))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["toml"]
    }
}
