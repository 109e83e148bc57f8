// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the read side of the
//! configuration system. Implementors supply key resolution through [`get`]; every
//! typed accessor is a provided method that calls `get` and then applies its own
//! lenient cast, so a mistyped or missing entry yields the target's zero value.
//!
//! [`get`]: ConfigurationService::get

use crate::domain::cast;
use crate::domain::{ConfigKey, ConfigValue, ValueMap};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// The read interface of a configuration store.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigKey, ConfigValue, ConfigurationService};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get(&self, key: &str) -> Option<ConfigValue> {
///         (key == "port").then(|| ConfigValue::from("8080"))
///     }
///     fn in_config(&self, _key: &str) -> bool {
///         false
///     }
///     fn all_keys(&self) -> Vec<ConfigKey> {
///         vec![ConfigKey::from("port")]
///     }
/// }
///
/// let service = Fixed;
/// assert_eq!(service.get_int("port"), 8080);
/// assert_eq!(service.get_int("missing"), 0);
/// assert!(service.is_set("port"));
/// ```
pub trait ConfigurationService {
    /// Resolves `key` across all layers and coerces the hit to its witness type.
    ///
    /// Returns `None` when no layer, and no nested mapping reachable through a key
    /// prefix, holds the key.
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// Reports whether the loaded config layer alone holds `key`.
    fn in_config(&self, key: &str) -> bool;

    /// Returns every canonical key present in any layer, without duplicates.
    fn all_keys(&self) -> Vec<ConfigKey>;

    /// Reports whether `key` resolves to a value.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolves every key from [`all_keys`](Self::all_keys) into one mapping.
    fn all_settings(&self) -> ValueMap {
        self.all_keys()
            .into_iter()
            .filter_map(|key| {
                let value = self.get(key.as_str())?;
                Some((key.into_string(), value))
            })
            .collect()
    }

    /// Returns the value for `key` as a string.
    fn get_string(&self, key: &str) -> String {
        self.get(key).map(|v| cast::to_string(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as a boolean.
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| cast::to_bool(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as an integer.
    fn get_int(&self, key: &str) -> i64 {
        self.get(key).map(|v| cast::to_int(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as a float.
    fn get_float64(&self, key: &str) -> f64 {
        self.get(key).map(|v| cast::to_float64(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as a UTC timestamp.
    fn get_time(&self, key: &str) -> DateTime<Utc> {
        self.get(key).map(|v| cast::to_time(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as a duration.
    fn get_duration(&self, key: &str) -> Duration {
        self.get(key).map(|v| cast::to_duration(&v)).unwrap_or_default()
    }

    /// Returns the value for `key` as a list of strings.
    fn get_string_slice(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| cast::to_string_slice(&v))
            .unwrap_or_default()
    }

    /// Returns the value for `key` as a nested mapping.
    fn get_string_map(&self, key: &str) -> ValueMap {
        self.get(key)
            .map(|v| cast::to_string_map(&v))
            .unwrap_or_default()
    }

    /// Returns the value for `key` as a mapping of strings.
    fn get_string_map_string(&self, key: &str) -> HashMap<String, String> {
        self.get(key)
            .map(|v| cast::to_string_map_string(&v))
            .unwrap_or_default()
    }

    /// Returns the value for `key` as a mapping of string lists.
    fn get_string_map_string_slice(&self, key: &str) -> HashMap<String, Vec<String>> {
        self.get(key)
            .map(|v| cast::to_string_map_string_slice(&v))
            .unwrap_or_default()
    }

    /// Returns the value for `key` parsed as a byte size, e.g. `"10MB"`.
    fn get_size_in_bytes(&self, key: &str) -> u64 {
        cast::parse_size_in_bytes(&self.get_string(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfigService {
        values: ValueMap,
    }

    impl TestConfigService {
        fn new() -> Self {
            let mut values = ValueMap::new();
            values.insert("flag".to_string(), ConfigValue::from(true));
            values.insert("count".to_string(), ConfigValue::from("12"));
            values.insert("ratio".to_string(), ConfigValue::from(0.25));
            values.insert("timeout".to_string(), ConfigValue::from("1m"));
            values.insert("limit".to_string(), ConfigValue::from("4KB"));
            values.insert("names".to_string(), ConfigValue::from(vec!["a", "b"]));
            Self { values }
        }
    }

    impl ConfigurationService for TestConfigService {
        fn get(&self, key: &str) -> Option<ConfigValue> {
            self.values.get(key).cloned()
        }

        fn in_config(&self, key: &str) -> bool {
            self.values.contains_key(key)
        }

        fn all_keys(&self) -> Vec<ConfigKey> {
            self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect()
        }
    }

    #[test]
    fn test_typed_accessors() {
        let service = TestConfigService::new();
        assert!(service.get_bool("flag"));
        assert_eq!(service.get_int("count"), 12);
        assert_eq!(service.get_float64("ratio"), 0.25);
        assert_eq!(service.get_duration("timeout"), Duration::from_secs(60));
        assert_eq!(service.get_size_in_bytes("limit"), 4096);
        assert_eq!(service.get_string_slice("names"), vec!["a", "b"]);
    }

    #[test]
    fn test_second_cast_pass_crosses_types() {
        let service = TestConfigService::new();
        assert_eq!(service.get_int("flag"), 1);
        assert_eq!(service.get_string("ratio"), "0.25");
        assert!(service.get_bool("ratio"));
        assert!(!service.get_bool("count"));
    }

    #[test]
    fn test_missing_key_yields_zero_values() {
        let service = TestConfigService::new();
        assert!(!service.is_set("nope"));
        assert_eq!(service.get_string("nope"), "");
        assert_eq!(service.get_int("nope"), 0);
        assert!(!service.get_bool("nope"));
        assert_eq!(service.get_time("nope"), DateTime::<Utc>::default());
        assert!(service.get_string_map("nope").is_empty());
        assert!(service.get_string_map_string("nope").is_empty());
        assert!(service.get_string_map_string_slice("nope").is_empty());
        assert_eq!(service.get_size_in_bytes("nope"), 0);
    }

    #[test]
    fn test_all_settings_collects_every_key() {
        let service = TestConfigService::new();
        let settings = service.all_settings();
        assert_eq!(settings.len(), 6);
        assert_eq!(settings.get("count"), Some(&ConfigValue::from("12")));
    }
}
