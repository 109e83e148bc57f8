// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration parser.

use crate::domain::{ConfigError, ConfigValue, Result, ValueMap};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// Mappings stay nested, sequences become [`ConfigValue::List`] and nulls are
/// dropped. Non-string mapping keys (numbers, booleans) are stringified.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::YamlParser;
/// use layercfg::domain::ConfigValue;
/// use layercfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let parsed = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// let database = parsed.get("database").and_then(ConfigValue::as_map).unwrap();
/// assert_eq!(database.get("port"), Some(&ConfigValue::from(5432)));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn key_string(key: serde_yaml::Value) -> Option<String> {
        match key {
            serde_yaml::Value::String(s) => Some(s),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn convert(value: serde_yaml::Value) -> Option<ConfigValue> {
        match value {
            serde_yaml::Value::Null => None,
            serde_yaml::Value::Bool(b) => Some(ConfigValue::Bool(b)),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Integer(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            serde_yaml::Value::String(s) => Some(ConfigValue::String(s)),
            serde_yaml::Value::Sequence(seq) => Some(ConfigValue::List(
                seq.into_iter().filter_map(Self::convert).collect(),
            )),
            serde_yaml::Value::Mapping(map) => Some(ConfigValue::Map(Self::convert_mapping(map))),
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value),
        }
    }

    fn convert_mapping(map: serde_yaml::Mapping) -> ValueMap {
        map.into_iter()
            .filter_map(|(k, v)| Some((Self::key_string(k)?, Self::convert(v)?)))
            .collect()
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ValueMap> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_yaml::Value::Null => Ok(ValueMap::new()),
            serde_yaml::Value::Mapping(map) => Ok(Self::convert_mapping(map)),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "YAML document must be a mapping at the top level, found {:?}",
                    other
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_parser_simple() {
        let parser = YamlParser::new();
        let result = parser.parse("key: value").unwrap();
        assert_eq!(result.get("key"), Some(&ConfigValue::from("value")));
    }

    #[test]
    fn test_yaml_parser_deeply_nested() {
        let parser = YamlParser::new();
        let yaml = r#"
app:
  database:
    connection:
      host: localhost
      port: 5432
"#;
        let result = parser.parse(yaml).unwrap();
        let app = result.get("app").unwrap();
        let connection = crate::service::path_resolver::search_map(app, &["database", "connection"])
            .and_then(ConfigValue::as_map)
            .unwrap();
        assert_eq!(connection.get("host"), Some(&ConfigValue::from("localhost")));
        assert_eq!(connection.get("port"), Some(&ConfigValue::Integer(5432)));
    }

    #[test]
    fn test_yaml_parser_sequence() {
        let parser = YamlParser::new();
        let yaml = r#"
servers:
  - server1
  - server2
"#;
        let result = parser.parse(yaml).unwrap();
        assert_eq!(
            result.get("servers"),
            Some(&ConfigValue::List(vec![
                ConfigValue::from("server1"),
                ConfigValue::from("server2"),
            ]))
        );
    }

    #[test]
    fn test_yaml_parser_mixed_types() {
        let parser = YamlParser::new();
        let yaml = r#"
string_value: hello
number_value: 42
float_value: 1.5
bool_value: true
null_value: null
"#;
        let result = parser.parse(yaml).unwrap();

        assert_eq!(result.get("string_value"), Some(&ConfigValue::from("hello")));
        assert_eq!(result.get("number_value"), Some(&ConfigValue::Integer(42)));
        assert_eq!(result.get("float_value"), Some(&ConfigValue::Float(1.5)));
        assert_eq!(result.get("bool_value"), Some(&ConfigValue::Bool(true)));
        assert!(!result.contains_key("null_value"));
    }

    #[test]
    fn test_yaml_parser_numeric_keys() {
        let parser = YamlParser::new();
        let result = parser.parse("codes:\n  404: missing").unwrap();
        let codes = result.get("codes").and_then(ConfigValue::as_map).unwrap();
        assert_eq!(codes.get("404"), Some(&ConfigValue::from("missing")));
    }

    #[test]
    fn test_yaml_parser_empty_document() {
        let parser = YamlParser::new();
        assert!(parser.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_parser_top_level_sequence_rejected() {
        let parser = YamlParser::new();
        let result = parser.parse("- a\n- b");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlParser::new();
        assert!(parser.parse("invalid: yaml: content:").is_err());
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::default();
        let extensions = parser.supported_extensions();
        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(&"yaml"));
        assert!(extensions.contains(&"yml"));
    }
}
