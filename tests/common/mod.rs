// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use layercfg::domain::{ConfigValue, ValueMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds a mapping from `(key, value)` pairs.
pub fn value_map(entries: Vec<(&str, ConfigValue)>) -> ValueMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Builds a nested mapping value from `(key, value)` pairs.
pub fn nested(entries: Vec<(&str, ConfigValue)>) -> ConfigValue {
    ConfigValue::Map(value_map(entries))
}

/// Writes `content` to `dir/file_name` and returns the full path.
pub fn write_config(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("failed to write test config");
    path
}

/// Routes log output through the test harness. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
