// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three precedence-ordered value layers.

use crate::domain::config_value::fold_map_keys;
use crate::domain::{ConfigValue, ValueMap};
use std::collections::HashSet;
use std::fmt;

/// One of the store's layers, highest precedence first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Values set programmatically at runtime
    Override,
    /// Values from the most recently loaded config source
    Config,
    /// Fallback values supplied by the application
    Default,
}

impl Layer {
    /// All layers in precedence order.
    pub const PRECEDENCE: [Layer; 3] = [Layer::Override, Layer::Config, Layer::Default];

    /// A short name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Override => "overrides",
            Layer::Config => "config",
            Layer::Default => "defaults",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage for the override, config and default layers.
///
/// Keys are expected to be canonical already; the store does not lowercase or
/// alias-resolve them. Values are case-folded on insertion so nested mapping keys
/// are lowercase as well.
#[derive(Clone, Debug, Default)]
pub struct LayeredStore {
    overrides: ValueMap,
    config: ValueMap,
    defaults: ValueMap,
}

impl LayeredStore {
    /// Creates a store with three empty layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows one layer.
    pub fn layer(&self, layer: Layer) -> &ValueMap {
        match layer {
            Layer::Override => &self.overrides,
            Layer::Config => &self.config,
            Layer::Default => &self.defaults,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut ValueMap {
        match layer {
            Layer::Override => &mut self.overrides,
            Layer::Config => &mut self.config,
            Layer::Default => &mut self.defaults,
        }
    }

    /// Looks up an exact key in one layer.
    pub fn get(&self, layer: Layer, key: &str) -> Option<&ConfigValue> {
        self.layer(layer).get(key)
    }

    /// Reports whether one layer holds an exact key.
    pub fn contains(&self, layer: Layer, key: &str) -> bool {
        self.layer(layer).contains_key(key)
    }

    /// Stores `value` under `key` in one layer, replacing any previous entry.
    pub fn insert(&mut self, layer: Layer, key: String, value: ConfigValue) {
        self.layer_mut(layer).insert(key, value.into_case_folded());
    }

    /// Discards the config layer and installs `values` in its place.
    pub fn replace_config(&mut self, values: ValueMap) {
        self.config = fold_map_keys(values);
    }

    /// Moves the entry stored under `from` to `to` in every layer that has one.
    pub fn migrate(&mut self, from: &str, to: &str) {
        for layer in Layer::PRECEDENCE {
            let map = self.layer_mut(layer);
            if let Some(value) = map.remove(from) {
                tracing::debug!(%layer, from, to, "Moving value to aliased key");
                map.insert(to.to_string(), value);
            }
        }
    }

    /// Returns the union of keys across all layers, without duplicates.
    pub fn keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        Layer::PRECEDENCE
            .iter()
            .flat_map(|layer| self.layer(*layer).keys())
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_are_independent() {
        let mut store = LayeredStore::new();
        store.insert(Layer::Override, "k".to_string(), ConfigValue::from(1));
        store.insert(Layer::Default, "k".to_string(), ConfigValue::from(2));

        assert_eq!(store.get(Layer::Override, "k"), Some(&ConfigValue::from(1)));
        assert_eq!(store.get(Layer::Default, "k"), Some(&ConfigValue::from(2)));
        assert!(!store.contains(Layer::Config, "k"));
    }

    #[test]
    fn test_replace_config_discards_previous_contents() {
        let mut store = LayeredStore::new();
        let mut first = ValueMap::new();
        first.insert("a".to_string(), ConfigValue::from(1));
        store.replace_config(first);

        let mut second = ValueMap::new();
        second.insert("B".to_string(), ConfigValue::from(2));
        store.replace_config(second);

        assert!(!store.contains(Layer::Config, "a"));
        assert!(store.contains(Layer::Config, "b"));
    }

    #[test]
    fn test_insert_case_folds_nested_keys() {
        let mut inner = ValueMap::new();
        inner.insert("Host".to_string(), ConfigValue::from("db"));
        let mut store = LayeredStore::new();
        store.insert(Layer::Override, "database".to_string(), ConfigValue::Map(inner));

        let db = store.get(Layer::Override, "database").unwrap();
        assert!(db.as_map().unwrap().contains_key("host"));
    }

    #[test]
    fn test_migrate_moves_every_layer() {
        let mut store = LayeredStore::new();
        store.insert(Layer::Override, "old".to_string(), ConfigValue::from("o"));
        store.insert(Layer::Default, "old".to_string(), ConfigValue::from("d"));
        store.migrate("old", "new");

        assert!(!store.contains(Layer::Override, "old"));
        assert!(!store.contains(Layer::Default, "old"));
        assert_eq!(store.get(Layer::Override, "new"), Some(&ConfigValue::from("o")));
        assert_eq!(store.get(Layer::Default, "new"), Some(&ConfigValue::from("d")));
    }

    #[test]
    fn test_keys_is_deduplicated_union() {
        let mut store = LayeredStore::new();
        store.insert(Layer::Override, "a".to_string(), ConfigValue::from(1));
        store.insert(Layer::Default, "a".to_string(), ConfigValue::from(1));
        store.insert(Layer::Default, "b".to_string(), ConfigValue::from(1));

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_layer_display() {
        assert_eq!(Layer::Override.to_string(), "overrides");
        assert_eq!(Layer::Config.to_string(), "config");
        assert_eq!(Layer::Default.to_string(), "defaults");
    }
}
