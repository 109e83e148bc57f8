// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical configuration key.
//!
//! This module provides the `ConfigKey` type, a newtype wrapper around `String` that
//! always holds the lowercase form of a key. Every key handed to the store passes
//! through `ConfigKey` before storage or lookup, which is what makes keys
//! case-insensitive.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A lowercase configuration key.
///
/// A `ConfigKey` is the case-folded identity of a configuration entry. It is not yet
/// alias-resolved: the store maps it through its alias table before touching a layer.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("Database.Host");
/// assert_eq!(key.as_str(), "database.host");
/// assert_eq!(key.segments("."), vec!["database", "host"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey`, lowercasing the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::new("App.NAME");
    /// assert_eq!(key.as_str(), "app.name");
    /// ```
    pub fn new(key: impl AsRef<str>) -> Self {
        ConfigKey(key.as_ref().to_lowercase())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true when the key has more than one path segment.
    pub fn is_nested(&self, delimiter: &str) -> bool {
        !delimiter.is_empty() && self.0.contains(delimiter)
    }

    /// Splits the key into its path segments.
    ///
    /// A key without the delimiter yields a single segment.
    pub fn segments<'a>(&'a self, delimiter: &str) -> Vec<&'a str> {
        if delimiter.is_empty() {
            return vec![self.0.as_str()];
        }
        self.0.split(delimiter).collect()
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::new(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::new(s)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
