// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding resolved settings into caller-defined types.
//!
//! [`decode`] is strict: values must already have the shape the target expects.
//! [`weak_decode`] converts scalars on the way in, so `"8080"` fills a `u16` field
//! and `"yes"` fills a `bool`, and matches struct fields regardless of case.

use crate::domain::cast;
use crate::domain::errors::CastError;
use crate::domain::{ConfigError, ConfigValue, Result};
use serde::de::value::{MapDeserializer, SeqDeserializer, StrDeserializer};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use thiserror::Error;

/// Deserializes `value` into `T` through an intermediate JSON value.
///
/// Times render as RFC 3339 strings and durations in the `1h2m3s` form, so fields
/// receiving them should be `String` or carry their own deserializer.
///
/// # Examples
///
/// ```
/// use layercfg::adapters::decode::decode;
/// use layercfg::domain::{ConfigValue, ValueMap};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let mut map = ValueMap::new();
/// map.insert("host".to_string(), ConfigValue::from("localhost"));
/// map.insert("port".to_string(), ConfigValue::from(8080));
///
/// let server: Server = decode(&ConfigValue::Map(map)).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
pub fn decode<T: DeserializeOwned>(value: &ConfigValue) -> Result<T> {
    let json = serde_json::to_value(value).map_err(|e| ConfigError::DecodeError {
        message: format!("Failed to serialize settings: {}", e),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_value(json).map_err(|e| ConfigError::DecodeError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}

/// Deserializes `value` into `T`, converting scalars to the types `T` asks for.
///
/// Conversions follow the strict casts in [`cast`](crate::domain::cast): a value
/// with no reading as the requested type is still an error. A single value fills a
/// sequence field as a one-element list. Struct fields match keys ignoring case.
///
/// # Examples
///
/// ```
/// use layercfg::adapters::decode::weak_decode;
/// use layercfg::domain::{ConfigValue, ValueMap};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Server {
///     port: u16,
///     tls: bool,
/// }
///
/// let mut map = ValueMap::new();
/// map.insert("port".to_string(), ConfigValue::from("8443"));
/// map.insert("tls".to_string(), ConfigValue::from("on"));
///
/// let server: Server = weak_decode(&ConfigValue::Map(map)).unwrap();
/// assert_eq!(server.port, 8443);
/// assert!(server.tls);
/// ```
pub fn weak_decode<T: DeserializeOwned>(value: &ConfigValue) -> Result<T> {
    T::deserialize(WeakValue(value)).map_err(|e| ConfigError::DecodeError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}

#[derive(Debug, Error)]
#[error("{0}")]
struct WeakDecodeError(String);

impl de::Error for WeakDecodeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        WeakDecodeError(msg.to_string())
    }
}

impl From<CastError> for WeakDecodeError {
    fn from(err: CastError) -> Self {
        WeakDecodeError(err.to_string())
    }
}

type WeakResult<T> = std::result::Result<T, WeakDecodeError>;

#[derive(Clone, Copy)]
struct WeakValue<'a>(&'a ConfigValue);

impl<'de, 'a> IntoDeserializer<'de, WeakDecodeError> for WeakValue<'a> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

fn visit_items<'de, V, I>(items: I, visitor: V) -> WeakResult<V::Value>
where
    V: Visitor<'de>,
    I: Iterator,
    I::Item: IntoDeserializer<'de, WeakDecodeError>,
{
    let mut access = SeqDeserializer::<I, WeakDecodeError>::new(items);
    let value = visitor.visit_seq(&mut access)?;
    access.end()?;
    Ok(value)
}

fn visit_entries<'de, 'a, V, I>(entries: I, visitor: V) -> WeakResult<V::Value>
where
    V: Visitor<'de>,
    I: Iterator<Item = (&'a str, WeakValue<'a>)>,
{
    let mut access = MapDeserializer::<'de, I, WeakDecodeError>::new(entries);
    let value = visitor.visit_map(&mut access)?;
    access.end()?;
    Ok(value)
}

impl<'de, 'a> de::Deserializer<'de> for WeakValue<'a> {
    type Error = WeakDecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        match self.0 {
            ConfigValue::Bool(b) => visitor.visit_bool(*b),
            ConfigValue::String(s) => visitor.visit_str(s),
            ConfigValue::Integer(n) => visitor.visit_i64(*n),
            ConfigValue::Float(f) => visitor.visit_f64(*f),
            ConfigValue::Time(t) => visitor.visit_string(cast::format_time(t)),
            ConfigValue::Duration(d) => visitor.visit_string(cast::format_duration(*d)),
            ConfigValue::StringList(items) => visit_items(items.iter().map(String::as_str), visitor),
            ConfigValue::List(items) => visit_items(items.iter().map(WeakValue), visitor),
            ConfigValue::Map(map) => visit_entries(
                map.iter().map(|(k, v)| (k.as_str(), WeakValue(v))),
                visitor,
            ),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        visitor.visit_bool(cast::try_to_bool(self.0)?)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        visitor.visit_i64(cast::try_to_int(self.0)?)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        visitor.visit_f64(cast::try_to_float64(self.0)?)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        match self.0 {
            ConfigValue::StringList(_) | ConfigValue::List(_) | ConfigValue::Map(_) => {
                self.deserialize_any(visitor)
            }
            scalar => visitor.visit_string(cast::try_to_string(scalar)?),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> WeakResult<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> WeakResult<V::Value> {
        match self.0 {
            ConfigValue::StringList(_) | ConfigValue::List(_) => self.deserialize_any(visitor),
            _ => visit_items(std::iter::once(self), visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> WeakResult<V::Value> {
        let ConfigValue::Map(map) = self.0 else {
            return self.deserialize_any(visitor);
        };
        let entries = map.iter().map(|(key, value)| {
            let field = fields
                .iter()
                .find(|field| field.eq_ignore_ascii_case(key))
                .copied()
                .unwrap_or(key.as_str());
            (field, WeakValue(value))
        });
        visit_entries(entries, visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> WeakResult<V::Value> {
        match self.0 {
            ConfigValue::String(s) => {
                let variant: StrDeserializer<'_, WeakDecodeError> = s.as_str().into_deserializer();
                visitor.visit_enum(variant)
            }
            _ => self.deserialize_any(visitor),
        }
    }

    forward_to_deserialize_any! {
        i128 u128 char bytes byte_buf unit unit_struct tuple tuple_struct map
        identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueMap;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Database {
        host: String,
        port: u16,
        #[serde(default)]
        replicas: Vec<String>,
    }

    fn database_map() -> ConfigValue {
        let mut map = ValueMap::new();
        map.insert("host".to_string(), ConfigValue::from("db.local"));
        map.insert("port".to_string(), ConfigValue::from(5432));
        map.insert(
            "replicas".to_string(),
            ConfigValue::from(vec!["r1", "r2"]),
        );
        ConfigValue::Map(map)
    }

    fn map(entries: Vec<(&str, ConfigValue)>) -> ConfigValue {
        ConfigValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_decode_struct() {
        let db: Database = decode(&database_map()).unwrap();
        assert_eq!(
            db,
            Database {
                host: "db.local".to_string(),
                port: 5432,
                replicas: vec!["r1".to_string(), "r2".to_string()],
            }
        );
    }

    #[test]
    fn test_decode_scalar() {
        let port: u16 = decode(&ConfigValue::from(80)).unwrap();
        assert_eq!(port, 80);
    }

    #[test]
    fn test_decode_into_map() {
        let map: HashMap<String, serde_json::Value> = decode(&database_map()).unwrap();
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_decode_missing_field() {
        let mut map = ValueMap::new();
        map.insert("host".to_string(), ConfigValue::from("db.local"));
        let result: Result<Database> = decode(&ConfigValue::Map(map));
        match result {
            Err(ConfigError::DecodeError { message, .. }) => assert!(message.contains("port")),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrong_type() {
        let result: Result<u16> = decode(&ConfigValue::from("eighty"));
        assert!(matches!(result, Err(ConfigError::DecodeError { .. })));
        let result: Result<u16> = decode(&ConfigValue::from("80"));
        assert!(matches!(result, Err(ConfigError::DecodeError { .. })));
    }

    #[test]
    fn test_weak_decode_matches_strict_on_typed_values() {
        let db: Database = weak_decode(&database_map()).unwrap();
        assert_eq!(db, decode::<Database>(&database_map()).unwrap());
    }

    #[test]
    fn test_weak_decode_converts_strings() {
        #[derive(Debug, Deserialize)]
        struct Server {
            port: u16,
            debug: bool,
            ratio: f64,
            name: String,
        }

        let server: Server = weak_decode(&map(vec![
            ("port", ConfigValue::from("8080")),
            ("debug", ConfigValue::from("yes")),
            ("ratio", ConfigValue::from("0.25")),
            ("name", ConfigValue::from(42)),
        ]))
        .unwrap();
        assert_eq!(server.port, 8080);
        assert!(server.debug);
        assert_eq!(server.ratio, 0.25);
        assert_eq!(server.name, "42");
    }

    #[test]
    fn test_weak_decode_field_case() {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Pool {
            max_connections: u32,
            idle_timeout: String,
        }

        let pool: Pool = weak_decode(&map(vec![
            ("maxconnections", ConfigValue::from(10)),
            (
                "idletimeout",
                ConfigValue::from(std::time::Duration::from_secs(90)),
            ),
        ]))
        .unwrap();
        assert_eq!(pool.max_connections, 10);
        assert_eq!(pool.idle_timeout, "1m30s");
    }

    #[test]
    fn test_weak_decode_single_value_into_list() {
        let hosts: Vec<String> = weak_decode(&ConfigValue::from("a")).unwrap();
        assert_eq!(hosts, vec!["a"]);
        let ports: Vec<u16> =
            weak_decode(&ConfigValue::List(vec![ConfigValue::from("1"), ConfigValue::from(2)]))
                .unwrap();
        assert_eq!(ports, vec![1, 2]);
    }

    #[test]
    fn test_weak_decode_optional_and_enum() {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "lowercase")]
        enum Level {
            Debug,
            Info,
        }

        #[derive(Debug, Deserialize)]
        struct Logging {
            level: Level,
            file: Option<String>,
            #[serde(default)]
            rotate: Option<bool>,
        }

        let logging: Logging = weak_decode(&map(vec![
            ("level", ConfigValue::from("info")),
            ("file", ConfigValue::from("app.log")),
        ]))
        .unwrap();
        assert_eq!(logging.level, Level::Info);
        assert_eq!(logging.file.as_deref(), Some("app.log"));
        assert_eq!(logging.rotate, None);
    }

    #[test]
    fn test_weak_decode_rejects_unreadable_values() {
        let result: Result<u16> = weak_decode(&ConfigValue::from("eighty"));
        assert!(matches!(result, Err(ConfigError::DecodeError { .. })));
        let result: Result<u16> = weak_decode(&ConfigValue::from(-1));
        assert!(matches!(result, Err(ConfigError::DecodeError { .. })));
        let result: Result<bool> = weak_decode(&ConfigValue::from("maybe"));
        match result {
            Err(ConfigError::DecodeError { message, .. }) => assert!(message.contains("maybe")),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }
}
