// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration parser.

use crate::domain::{ConfigError, ConfigValue, Result, ValueMap};
use crate::ports::ConfigParser;

/// JSON parser implementation.
///
/// Objects stay nested, arrays become [`ConfigValue::List`] and nulls are dropped.
/// The document must be an object at the top level.
#[derive(Debug, Clone)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    fn convert(value: serde_json::Value) -> Option<ConfigValue> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(ConfigValue::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Integer(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            serde_json::Value::String(s) => Some(ConfigValue::String(s)),
            serde_json::Value::Array(items) => Some(ConfigValue::List(
                items.into_iter().filter_map(Self::convert).collect(),
            )),
            serde_json::Value::Object(map) => Some(ConfigValue::Map(Self::convert_object(map))),
        }
    }

    fn convert_object(map: serde_json::Map<String, serde_json::Value>) -> ValueMap {
        map.into_iter()
            .filter_map(|(k, v)| Some((k, Self::convert(v)?)))
            .collect()
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ValueMap> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_json::Value::Object(map) => Ok(Self::convert_object(map)),
            other => Err(ConfigError::ParseError {
                message: format!("JSON document must be an object, found {}", other),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
