// SPDX-License-Identifier: MIT OR Apache-2.0

//! The layered configuration store.
//!
//! This module provides `LayeredConfig`, which combines the alias table, the three
//! value layers and nested-map descent into a single lookup with precedence and
//! coercion rules, and `LayeredConfigBuilder` for constructing one.

use crate::adapters::decode::{decode, weak_decode};
use crate::adapters::file_locator::{read_config_file, ConfigFileLocator};
use crate::adapters::default_parsers;
use crate::domain::cast;
use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result, ValueKind, ValueMap,
};
use crate::ports::ConfigParser;
use crate::service::alias_table::{AliasTable, Registration};
use crate::service::layered_store::{Layer, LayeredStore};
use crate::service::path_resolver::search_map;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

/// Separator between the segments of a nested key, unless configured otherwise.
pub const DEFAULT_KEY_DELIMITER: &str = ".";

/// Bound on nested lookups re-entering `find`.
///
/// Only aliases whose targets contain the delimiter and lead back into each other
/// can come close to it.
pub const MAX_FIND_DEPTH: usize = 32;

/// A configuration store with override, config and default layers.
///
/// Lookups resolve aliases, then take the first hit from overrides, the loaded
/// config, a nested mapping reached through the key's first segment, and finally
/// defaults. Keys are case-insensitive.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
///
/// let mut config = LayeredConfig::new();
/// config.set_default("server.port", 8080);
/// config.set("Server.Port", 9090);
///
/// assert_eq!(config.get_int("server.port"), 9090);
/// assert!(!config.in_config("server.port"));
/// ```
pub struct LayeredConfig {
    store: LayeredStore,
    aliases: AliasTable,
    key_delimiter: String,
    type_by_default_value: bool,
    locator: ConfigFileLocator,
    parsers: Vec<Box<dyn ConfigParser>>,
    config_file_used: Option<PathBuf>,
}

impl LayeredConfig {
    /// Creates an empty store with the default delimiter and every enabled parser.
    pub fn new() -> Self {
        Self {
            store: LayeredStore::new(),
            aliases: AliasTable::new(),
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            type_by_default_value: false,
            locator: ConfigFileLocator::new(),
            parsers: default_parsers(),
            config_file_used: None,
        }
    }

    /// Creates a new builder.
    pub fn builder() -> LayeredConfigBuilder {
        LayeredConfigBuilder::new()
    }

    /// The separator between nested key segments.
    pub fn key_delimiter(&self) -> &str {
        &self.key_delimiter
    }

    fn canonical_key(&self, key: &str) -> String {
        let key = ConfigKey::new(key);
        self.aliases.real_key(key.as_str()).to_string()
    }

    /// Sets an override, which takes precedence over every other layer.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        let key = self.canonical_key(key);
        self.store.insert(Layer::Override, key, value.into());
    }

    /// Sets a default, used when no other layer holds the key.
    pub fn set_default(&mut self, key: &str, value: impl Into<ConfigValue>) {
        let key = self.canonical_key(key);
        self.store.insert(Layer::Default, key, value.into());
    }

    /// Makes `alias` another name for `key`.
    ///
    /// Any value already stored under `alias` moves to the key it now resolves to.
    /// Registrations that would create a cycle are skipped with a warning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::prelude::*;
    ///
    /// let mut config = LayeredConfig::new();
    /// config.register_alias("loud", "verbose");
    /// config.set("loud", true);
    /// assert!(config.get_bool("verbose"));
    /// ```
    pub fn register_alias(&mut self, alias: &str, key: &str) {
        let alias = alias.to_lowercase();
        let key = key.to_lowercase();
        if self.aliases.register(&alias, &key) == Registration::Added {
            let target = self.aliases.real_key(&alias).to_string();
            self.store.migrate(&alias, &target);
        }
    }

    /// Discards the config layer and installs `values` in its place.
    pub fn replace_config(&mut self, values: ValueMap) {
        self.store.replace_config(values);
    }

    /// Uses the default of a key, when one exists, as the type to coerce to on read.
    pub fn set_type_by_default_value(&mut self, enabled: bool) {
        self.type_by_default_value = enabled;
    }

    /// Resolves `key` to its raw stored value, without coercion.
    pub fn find(&self, key: &str) -> Option<&ConfigValue> {
        let key = ConfigKey::new(key);
        self.find_at_depth(key.as_str(), 0)
    }

    fn find_at_depth(&self, key: &str, depth: usize) -> Option<&ConfigValue> {
        if depth > MAX_FIND_DEPTH {
            tracing::warn!(key, depth, "Nested lookup too deep, giving up");
            return None;
        }

        let key = self.aliases.real_key(key);

        if let Some(value) = self.store.get(Layer::Override, key) {
            tracing::trace!(key, ?value, "Found in overrides");
            return Some(value);
        }
        if let Some(value) = self.store.get(Layer::Config, key) {
            tracing::trace!(key, ?value, "Found in config");
            return Some(value);
        }
        if key.contains(self.key_delimiter.as_str()) {
            let path: Vec<&str> = key.split(self.key_delimiter.as_str()).collect();
            if let Some(value) = self.find_nested(&path, depth, true) {
                tracing::trace!(key, ?value, "Found in nested config");
                return Some(value);
            }
        }
        if let Some(value) = self.store.get(Layer::Default, key) {
            tracing::trace!(key, ?value, "Found in defaults");
            return Some(value);
        }
        None
    }

    /// Resolves the first segment of `path` and descends into it with the rest.
    ///
    /// With `maps_only` set, a prefix that is not a mapping is a miss. Otherwise the
    /// descent ends at the first scalar and returns it.
    fn find_nested(
        &self,
        path: &[&str],
        depth: usize,
        maps_only: bool,
    ) -> Option<&ConfigValue> {
        let (first, rest) = path.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let source = self.find_at_depth(first, depth + 1)?;
        if maps_only && !source.is_map() {
            return None;
        }
        search_map(source, rest)
    }

    fn coerce(&self, key: &ConfigKey, found: &ConfigValue) -> ConfigValue {
        let witness = if self.type_by_default_value {
            self.store
                .get(Layer::Default, self.aliases.real_key(key.as_str()))
                .unwrap_or(found)
        } else {
            found
        };

        match witness.kind() {
            ValueKind::Bool => ConfigValue::Bool(cast::to_bool(found)),
            ValueKind::String => ConfigValue::String(cast::to_string(found)),
            ValueKind::Integer => ConfigValue::Integer(cast::to_int(found)),
            ValueKind::Float => ConfigValue::Float(cast::to_float64(found)),
            ValueKind::Time => ConfigValue::Time(cast::to_time(found)),
            ValueKind::Duration => ConfigValue::Duration(cast::to_duration(found)),
            ValueKind::StringList => ConfigValue::StringList(cast::to_string_slice(found)),
            ValueKind::List | ValueKind::Map => found.clone(),
        }
    }

    /// Sets the file name, without extension, to search for.
    pub fn set_config_name(&mut self, name: &str) {
        self.locator.set_config_name(name);
    }

    /// Loads this file instead of searching the config paths.
    pub fn set_config_file(&mut self, path: impl AsRef<Path>) {
        self.locator.set_config_file(path);
    }

    /// Forces the file format instead of inferring it from the extension.
    pub fn set_config_type(&mut self, config_type: &str) {
        self.locator.set_config_type(config_type);
    }

    /// Appends a directory to the config search path.
    pub fn add_config_path(&mut self, path: impl AsRef<Path>) {
        self.locator.add_config_path(path);
    }

    /// Appends the OS configuration directory for an application to the search path.
    pub fn add_default_location(&mut self, app_name: &str, qualifier: &str) -> Result<()> {
        self.locator.add_default_location(app_name, qualifier)
    }

    /// Registers an additional file format.
    pub fn add_parser(&mut self, parser: Box<dyn ConfigParser>) {
        self.parsers.push(parser);
    }

    /// File extensions of every registered parser, in search order.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|parser| parser.supported_extensions().iter().copied())
            .collect()
    }

    /// The file most recently loaded by [`read_in_config`](Self::read_in_config).
    pub fn config_file_used(&self) -> Option<&Path> {
        self.config_file_used.as_deref()
    }

    fn parser_for(&self, config_type: &str) -> Result<&dyn ConfigParser> {
        self.parsers
            .iter()
            .find(|parser| parser.supports(config_type))
            .map(|parser| parser.as_ref())
            .ok_or_else(|| ConfigError::UnsupportedConfigType {
                config_type: config_type.to_string(),
            })
    }

    /// Locates, reads and parses the config file, replacing the config layer.
    ///
    /// # Errors
    ///
    /// * `ConfigFileNotFound` - No explicit file is set and the search found none
    /// * `UnsupportedConfigType` - No parser handles the file's type
    /// * `SourceError` - The file could not be read or is too large
    /// * `ParseError` - The content is invalid for its format
    ///
    /// The config layer is left untouched on error.
    pub fn read_in_config(&mut self) -> Result<()> {
        tracing::info!("Attempting to read in config file");
        let path = self.locator.resolve(&self.supported_extensions())?;
        let config_type = self.locator.config_type_for(&path);
        let parser = self.parser_for(&config_type)?;
        let content = read_config_file(&path)?;
        let values = parser.parse(&content)?;

        tracing::info!(
            path = %path.display(),
            config_type = %config_type,
            keys = values.len(),
            "Loaded config file"
        );
        self.store.replace_config(values);
        self.config_file_used = Some(path);
        Ok(())
    }

    /// Parses `content` as `config_type` and replaces the config layer with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::prelude::*;
    ///
    /// # fn main() -> Result<()> {
    /// let mut config = LayeredConfig::new();
    /// config.read_config("{\"name\": \"demo\"}", "json")?;
    /// assert_eq!(config.get_string("name"), "demo");
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_config(&mut self, content: &str, config_type: &str) -> Result<()> {
        let values = self.parser_for(config_type)?.parse(content)?;
        self.store.replace_config(values);
        Ok(())
    }

    /// Decodes every resolved setting into `T`.
    ///
    /// Scalars are converted to the field types `T` asks for, and field names match
    /// keys regardless of case. See [`weak_decode`].
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        weak_decode(&ConfigValue::Map(self.all_settings()))
    }

    /// Decodes the resolved value of `key` into `T`.
    ///
    /// Values must already have the shape `T` expects. Returns `ConfigKeyNotFound`
    /// when the key does not resolve.
    pub fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key).ok_or_else(|| ConfigError::ConfigKeyNotFound {
            key: key.to_string(),
        })?;
        decode(&value)
    }

    /// Emits the alias table and every layer at DEBUG level.
    pub fn log_layers(&self) {
        let aliases: Vec<(&str, &str)> = self.aliases.iter().collect();
        tracing::debug!(?aliases, "Aliases");
        for layer in Layer::PRECEDENCE {
            tracing::debug!(%layer, values = ?self.store.layer(layer), "Layer contents");
        }
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredConfig")
            .field("key_delimiter", &self.key_delimiter)
            .field("type_by_default_value", &self.type_by_default_value)
            .field("aliases", &self.aliases)
            .field("overrides", self.store.layer(Layer::Override))
            .field("config", self.store.layer(Layer::Config))
            .field("defaults", self.store.layer(Layer::Default))
            .field("locator", &self.locator)
            .field("formats", &self.supported_extensions())
            .field("config_file_used", &self.config_file_used)
            .finish()
    }
}

impl ConfigurationService for LayeredConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        let key = ConfigKey::new(key);
        let found = self.find_at_depth(key.as_str(), 0).or_else(|| {
            let path = key.segments(&self.key_delimiter);
            self.find_nested(&path, 0, false)
        })?;
        Some(self.coerce(&key, found))
    }

    fn in_config(&self, key: &str) -> bool {
        let key = self.canonical_key(key);
        self.store.contains(Layer::Config, &key)
    }

    fn all_keys(&self) -> Vec<ConfigKey> {
        self.store.keys().into_iter().map(ConfigKey::from).collect()
    }
}

/// Builder for constructing a `LayeredConfig`.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let config = LayeredConfig::builder()
///     .key_delimiter("::")
///     .type_by_default_value(true)
///     .config_name("settings")
///     .build()?;
/// assert_eq!(config.key_delimiter(), "::");
/// # Ok(())
/// # }
/// ```
pub struct LayeredConfigBuilder {
    key_delimiter: String,
    type_by_default_value: bool,
    locator: ConfigFileLocator,
    default_location: Option<(String, String)>,
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl LayeredConfigBuilder {
    /// Creates a builder with the default delimiter and every enabled parser.
    pub fn new() -> Self {
        Self {
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            type_by_default_value: false,
            locator: ConfigFileLocator::new(),
            default_location: None,
            parsers: default_parsers(),
        }
    }

    /// Sets the separator between nested key segments. Empty delimiters are ignored.
    pub fn key_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            tracing::warn!(
                kept = %self.key_delimiter,
                "Ignoring empty key delimiter"
            );
        } else {
            self.key_delimiter = delimiter;
        }
        self
    }

    /// Coerces values to the type of their default, when one exists.
    pub fn type_by_default_value(mut self, enabled: bool) -> Self {
        self.type_by_default_value = enabled;
        self
    }

    /// Sets the file name, without extension, to search for.
    pub fn config_name(mut self, name: &str) -> Self {
        self.locator.set_config_name(name);
        self
    }

    /// Loads this file instead of searching the config paths.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.locator.set_config_file(path);
        self
    }

    /// Forces the file format instead of inferring it from the extension.
    pub fn config_type(mut self, config_type: &str) -> Self {
        self.locator.set_config_type(config_type);
        self
    }

    /// Appends a directory to the config search path.
    pub fn add_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.locator.add_config_path(path);
        self
    }

    /// Appends the OS configuration directory for an application when building.
    pub fn default_location(mut self, app_name: &str, qualifier: &str) -> Self {
        self.default_location = Some((app_name.to_string(), qualifier.to_string()));
        self
    }

    /// Registers an additional file format.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// Builds the store.
    ///
    /// Fails only when a default location was requested and the OS configuration
    /// directory cannot be determined.
    pub fn build(self) -> Result<LayeredConfig> {
        let mut locator = self.locator;
        if let Some((app_name, qualifier)) = &self.default_location {
            locator.add_default_location(app_name, qualifier)?;
        }

        Ok(LayeredConfig {
            store: LayeredStore::new(),
            aliases: AliasTable::new(),
            key_delimiter: self.key_delimiter,
            type_by_default_value: self.type_by_default_value,
            locator,
            parsers: self.parsers,
            config_file_used: None,
        })
    }
}

impl Default for LayeredConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
