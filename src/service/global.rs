// SPDX-License-Identifier: MIT OR Apache-2.0

//! A process-wide configuration store.
//!
//! Every function here locks one shared [`LayeredConfig`] and forwards to the method
//! of the same name. Reads take the lock shared, mutations take it exclusively. A
//! poisoned lock is recovered rather than propagated.
//!
//! # Examples
//!
//! ```rust
//! use layercfg::service::global;
//!
//! global::set_default("app.workers", 4);
//! assert_eq!(global::get_int("app.workers"), 4);
//! ```

use crate::domain::{ConfigKey, ConfigValue, ConfigurationService, Result, ValueMap};
use crate::service::LayeredConfig;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

static GLOBAL: Lazy<RwLock<LayeredConfig>> = Lazy::new(|| RwLock::new(LayeredConfig::new()));

fn read() -> RwLockReadGuard<'static, LayeredConfig> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, LayeredConfig> {
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the global store with a fresh, empty one.
pub fn reset() {
    *write() = LayeredConfig::new();
    tracing::debug!("Global configuration reset");
}

/// Runs `f` with shared access to the global store.
pub fn with<R>(f: impl FnOnce(&LayeredConfig) -> R) -> R {
    f(&read())
}

/// Runs `f` with exclusive access to the global store.
pub fn with_mut<R>(f: impl FnOnce(&mut LayeredConfig) -> R) -> R {
    f(&mut write())
}

/// See [`LayeredConfig::set`].
pub fn set(key: &str, value: impl Into<ConfigValue>) {
    write().set(key, value);
}

/// See [`LayeredConfig::set_default`].
pub fn set_default(key: &str, value: impl Into<ConfigValue>) {
    write().set_default(key, value);
}

/// See [`LayeredConfig::register_alias`].
pub fn register_alias(alias: &str, key: &str) {
    write().register_alias(alias, key);
}

/// See [`LayeredConfig::replace_config`].
pub fn replace_config(values: ValueMap) {
    write().replace_config(values);
}

/// See [`LayeredConfig::set_type_by_default_value`].
pub fn set_type_by_default_value(enabled: bool) {
    write().set_type_by_default_value(enabled);
}

/// See [`LayeredConfig::set_config_name`].
pub fn set_config_name(name: &str) {
    write().set_config_name(name);
}

/// See [`LayeredConfig::set_config_file`].
pub fn set_config_file(path: impl AsRef<Path>) {
    write().set_config_file(path);
}

/// See [`LayeredConfig::set_config_type`].
pub fn set_config_type(config_type: &str) {
    write().set_config_type(config_type);
}

/// See [`LayeredConfig::add_config_path`].
pub fn add_config_path(path: impl AsRef<Path>) {
    write().add_config_path(path);
}

/// See [`LayeredConfig::read_in_config`].
pub fn read_in_config() -> Result<()> {
    write().read_in_config()
}

/// See [`LayeredConfig::read_config`].
pub fn read_config(content: &str, config_type: &str) -> Result<()> {
    write().read_config(content, config_type)
}

/// See [`LayeredConfig::config_file_used`].
pub fn config_file_used() -> Option<PathBuf> {
    read().config_file_used().map(Path::to_path_buf)
}

/// See [`LayeredConfig::unmarshal`].
pub fn unmarshal<T: DeserializeOwned>() -> Result<T> {
    read().unmarshal()
}

/// See [`LayeredConfig::unmarshal_key`].
pub fn unmarshal_key<T: DeserializeOwned>(key: &str) -> Result<T> {
    read().unmarshal_key(key)
}

/// See [`LayeredConfig::log_layers`].
pub fn log_layers() {
    read().log_layers();
}

/// See [`ConfigurationService::get`].
pub fn get(key: &str) -> Option<ConfigValue> {
    read().get(key)
}

/// See [`ConfigurationService::is_set`].
pub fn is_set(key: &str) -> bool {
    read().is_set(key)
}

/// See [`ConfigurationService::in_config`].
pub fn in_config(key: &str) -> bool {
    read().in_config(key)
}

/// See [`ConfigurationService::all_keys`].
pub fn all_keys() -> Vec<ConfigKey> {
    read().all_keys()
}

/// See [`ConfigurationService::all_settings`].
pub fn all_settings() -> ValueMap {
    read().all_settings()
}

/// See [`ConfigurationService::get_string`].
pub fn get_string(key: &str) -> String {
    read().get_string(key)
}

/// See [`ConfigurationService::get_bool`].
pub fn get_bool(key: &str) -> bool {
    read().get_bool(key)
}

/// See [`ConfigurationService::get_int`].
pub fn get_int(key: &str) -> i64 {
    read().get_int(key)
}

/// See [`ConfigurationService::get_float64`].
pub fn get_float64(key: &str) -> f64 {
    read().get_float64(key)
}

/// See [`ConfigurationService::get_time`].
pub fn get_time(key: &str) -> DateTime<Utc> {
    read().get_time(key)
}

/// See [`ConfigurationService::get_duration`].
pub fn get_duration(key: &str) -> Duration {
    read().get_duration(key)
}

/// See [`ConfigurationService::get_string_slice`].
pub fn get_string_slice(key: &str) -> Vec<String> {
    read().get_string_slice(key)
}

/// See [`ConfigurationService::get_string_map`].
pub fn get_string_map(key: &str) -> ValueMap {
    read().get_string_map(key)
}

/// See [`ConfigurationService::get_string_map_string`].
pub fn get_string_map_string(key: &str) -> HashMap<String, String> {
    read().get_string_map_string(key)
}

/// See [`ConfigurationService::get_string_map_string_slice`].
pub fn get_string_map_string_slice(key: &str) -> HashMap<String, Vec<String>> {
    read().get_string_map_string_slice(key)
}

/// See [`ConfigurationService::get_size_in_bytes`].
pub fn get_size_in_bytes(key: &str) -> u64 {
    read().get_size_in_bytes(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // Shared with every other test in this binary: unique keys, no reset.

    #[test]
    fn test_set_and_get_through_global() {
        set("global_unit.name", "layer");
        assert_eq!(get_string("global_unit.name"), "layer");
        assert!(is_set("GLOBAL_UNIT.NAME"));
        assert!(!in_config("global_unit.name"));
    }

    #[test]
    fn test_with_and_with_mut() {
        with_mut(|config| config.set_default("global_unit.retries", 3));
        let retries = with(|config| config.get_int("global_unit.retries"));
        assert_eq!(retries, 3);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let key = format!("global_unit.thread{}", i);
                    set(&key, i);
                    get_int(&key)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), i as i64);
        }
    }
}
