// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic configuration value.
//!
//! This module provides the `ConfigValue` type, a closed tagged union covering every
//! shape a configuration entry can take: scalars, sequences and nested mappings.

use crate::domain::cast;
use crate::domain::errors::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// A nested mapping from string keys to values.
pub type ValueMap = HashMap<String, ConfigValue>;

/// An untyped configuration value.
///
/// Values set programmatically keep the variant chosen by their `From` conversion.
/// Values produced by parsers use `List` for every sequence; only values built from
/// a `Vec<String>` are `StringList`.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_value::{ConfigValue, ValueKind};
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.kind(), ValueKind::Integer);
/// assert_eq!(value.as_f64("answer").unwrap(), 42.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// A boolean
    Bool(bool),
    /// A string
    String(String),
    /// Any integer width, stored at native width
    Integer(i64),
    /// Any floating-point width
    Float(f64),
    /// A point in time
    Time(DateTime<Utc>),
    /// A length of time
    Duration(Duration),
    /// A sequence known to hold only strings
    StringList(Vec<String>),
    /// A sequence of arbitrary values
    List(Vec<ConfigValue>),
    /// A nested mapping
    Map(ValueMap),
}

/// The variant of a [`ConfigValue`], used as the witness when coercing on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `ConfigValue::Bool`
    Bool,
    /// `ConfigValue::String`
    String,
    /// `ConfigValue::Integer`
    Integer,
    /// `ConfigValue::Float`
    Float,
    /// `ConfigValue::Time`
    Time,
    /// `ConfigValue::Duration`
    Duration,
    /// `ConfigValue::StringList`
    StringList,
    /// `ConfigValue::List`
    List,
    /// `ConfigValue::Map`
    Map,
}

impl ValueKind {
    /// A short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Time => "time",
            ValueKind::Duration => "duration",
            ValueKind::StringList => "string list",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ConfigValue {
    /// Returns the variant of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::Integer(_) => ValueKind::Integer,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::Time(_) => ValueKind::Time,
            ConfigValue::Duration(_) => ValueKind::Duration,
            ConfigValue::StringList(_) => ValueKind::StringList,
            ConfigValue::List(_) => ValueKind::List,
            ConfigValue::Map(_) => ValueKind::Map,
        }
    }

    /// Returns true for nested mappings.
    pub fn is_map(&self) -> bool {
        matches!(self, ConfigValue::Map(_))
    }

    /// Borrows the nested mapping, if this is one.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the string, if this is one. No conversion is attempted.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value to a boolean, failing instead of degrading.
    ///
    /// `key` is only used to label the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_value::ConfigValue;
    ///
    /// assert!(ConfigValue::from("yes").as_bool("feature.enabled").unwrap());
    /// assert!(ConfigValue::from("maybe").as_bool("feature.enabled").is_err());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        cast::try_to_bool(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Converts the value to an `i64`, failing instead of degrading.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        cast::try_to_int(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Converts the value to an `f64`, failing instead of degrading.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        cast::try_to_float64(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Renders the value as a string, failing for sequences and mappings.
    pub fn as_string(&self, key: &str) -> Result<String> {
        cast::try_to_string(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Converts the value to a timestamp, failing instead of degrading.
    pub fn as_time(&self, key: &str) -> Result<DateTime<Utc>> {
        cast::try_to_time(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Converts the value to a duration, failing instead of degrading.
    pub fn as_duration(&self, key: &str) -> Result<Duration> {
        cast::try_to_duration(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Converts the value to a list of strings, failing instead of degrading.
    pub fn as_string_list(&self, key: &str) -> Result<Vec<String>> {
        cast::try_to_string_slice(self).map_err(|e| ConfigError::from_cast_error(key, e))
    }

    /// Lowercases every mapping key, recursively.
    pub(crate) fn into_case_folded(self) -> ConfigValue {
        match self {
            ConfigValue::Map(map) => ConfigValue::Map(fold_map_keys(map)),
            ConfigValue::List(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::into_case_folded).collect())
            }
            other => other,
        }
    }
}

/// Lowercases the keys of `map` and of every mapping nested in it.
///
/// When two keys differ only in case, the one visited last wins.
pub(crate) fn fold_map_keys(map: ValueMap) -> ValueMap {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value.into_case_folded()))
        .collect()
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Integer(i) => serializer.serialize_i64(*i),
            ConfigValue::Float(f) => serializer.serialize_f64(*f),
            ConfigValue::Time(t) => serializer.serialize_str(&cast::format_time(t)),
            ConfigValue::Duration(d) => serializer.serialize_str(&cast::format_duration(*d)),
            ConfigValue::StringList(items) => items.serialize(serializer),
            ConfigValue::List(items) => items.serialize(serializer),
            ConfigValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match cast::try_to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => match serde_json::to_string(self) {
                Ok(s) => f.write_str(&s),
                Err(_) => write!(f, "{:?}", self),
            },
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

macro_rules! from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(n: $t) -> Self {
                    ConfigValue::Integer(i64::from(n))
                }
            }
        )*
    };
}

from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for ConfigValue {
    fn from(n: isize) -> Self {
        ConfigValue::Integer(n as i64)
    }
}

impl From<usize> for ConfigValue {
    fn from(n: usize) -> Self {
        ConfigValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f32> for ConfigValue {
    fn from(n: f32) -> Self {
        ConfigValue::Float(f64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<DateTime<Utc>> for ConfigValue {
    fn from(t: DateTime<Utc>) -> Self {
        ConfigValue::Time(t)
    }
}

impl From<Duration> for ConfigValue {
    fn from(d: Duration) -> Self {
        ConfigValue::Duration(d)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        ConfigValue::StringList(items)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(items: Vec<&str>) -> Self {
        ConfigValue::StringList(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<ValueMap> for ConfigValue {
    fn from(map: ValueMap) -> Self {
        ConfigValue::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_of_each_variant() {
        assert_eq!(ConfigValue::from(true).kind(), ValueKind::Bool);
        assert_eq!(ConfigValue::from("x").kind(), ValueKind::String);
        assert_eq!(ConfigValue::from(7u8).kind(), ValueKind::Integer);
        assert_eq!(ConfigValue::from(1.5f32).kind(), ValueKind::Float);
        assert_eq!(
            ConfigValue::from(Duration::from_secs(1)).kind(),
            ValueKind::Duration
        );
        assert_eq!(ConfigValue::from(vec!["a"]).kind(), ValueKind::StringList);
        assert_eq!(
            ConfigValue::from(vec![ConfigValue::from(1)]).kind(),
            ValueKind::List
        );
        assert_eq!(ConfigValue::from(ValueMap::new()).kind(), ValueKind::Map);
    }

    #[test]
    fn test_integer_widths_collapse() {
        assert_eq!(ConfigValue::from(-3i8), ConfigValue::Integer(-3));
        assert_eq!(ConfigValue::from(70_000u32), ConfigValue::Integer(70_000));
        assert_eq!(ConfigValue::from(5usize), ConfigValue::Integer(5));
        assert_eq!(ConfigValue::from(u64::MAX), ConfigValue::Integer(i64::MAX));
    }

    #[test]
    fn test_case_folding_is_recursive() {
        let mut inner = ValueMap::new();
        inner.insert("Port".to_string(), ConfigValue::from(5432));
        let mut outer = ValueMap::new();
        outer.insert("DataBase".to_string(), ConfigValue::Map(inner));

        let folded = fold_map_keys(outer);
        let db = folded.get("database").and_then(ConfigValue::as_map).unwrap();
        assert_eq!(db.get("port"), Some(&ConfigValue::Integer(5432)));
    }

    #[test]
    fn test_case_folding_leaves_scalars_alone() {
        let value = ConfigValue::from("MiXeD").into_case_folded();
        assert_eq!(value, ConfigValue::from("MiXeD"));
    }

    #[test]
    fn test_strict_accessors_label_errors_with_key() {
        let value = ConfigValue::from("not a number");
        let err = value.as_i64("server.port").unwrap_err();
        assert!(err.to_string().contains("server.port"));
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
    }

    #[test]
    fn test_display_scalars_and_collections() {
        assert_eq!(ConfigValue::from(3.5).to_string(), "3.5");
        assert_eq!(ConfigValue::from(false).to_string(), "false");
        assert_eq!(ConfigValue::from(vec!["a", "b"]).to_string(), r#"["a","b"]"#);
    }

    #[test]
    fn test_serialize_to_json() {
        let mut map = ValueMap::new();
        map.insert("timeout".to_string(), ConfigValue::from(Duration::from_millis(1500)));
        map.insert(
            "started".to_string(),
            ConfigValue::from(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        );
        let json = serde_json::to_value(ConfigValue::Map(map)).unwrap();
        assert_eq!(json["timeout"], "1.5s");
        assert_eq!(json["started"], "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_as_map_and_as_str() {
        assert!(ConfigValue::from(1).as_map().is_none());
        assert_eq!(ConfigValue::from("abc").as_str(), Some("abc"));
        assert_eq!(ConfigValue::from(1).as_str(), None);
        assert!(ConfigValue::from(ValueMap::new()).is_map());
    }
}
