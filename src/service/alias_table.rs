// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alias indirection between key names.
//!
//! An alias lets one key name stand in for another, so a setting can be renamed
//! without breaking callers that still use the old name.

use std::collections::{HashMap, HashSet};

/// Outcome of [`AliasTable::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The alias was added.
    Added,
    /// The alias would have resolved back to itself and was skipped.
    Circular,
    /// The alias already exists; the existing target was kept.
    AlreadyRegistered,
}

/// A mapping from alias to target key, both lowercase.
///
/// Registration refuses any alias that would close a cycle, so every chain ends at
/// a key that is not itself an alias.
///
/// # Examples
///
/// ```
/// use layercfg::service::alias_table::{AliasTable, Registration};
///
/// let mut aliases = AliasTable::new();
/// assert_eq!(aliases.register("loud", "verbose"), Registration::Added);
/// assert_eq!(aliases.register("noisy", "loud"), Registration::Added);
/// assert_eq!(aliases.real_key("noisy"), "verbose");
/// assert_eq!(aliases.register("verbose", "noisy"), Registration::Circular);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Creates an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` as another name for `target`.
    pub fn register(&mut self, alias: &str, target: &str) -> Registration {
        if alias == target || alias == self.real_key(target) {
            tracing::warn!(
                alias,
                target,
                resolved = self.real_key(target),
                "Refusing to create circular reference alias"
            );
            return Registration::Circular;
        }
        if self.aliases.contains_key(alias) {
            tracing::debug!(alias, target, "Alias already registered, keeping existing target");
            return Registration::AlreadyRegistered;
        }
        self.aliases.insert(alias.to_string(), target.to_string());
        Registration::Added
    }

    /// Follows the alias chain starting at `key` and returns its final target.
    ///
    /// Keys that are not aliases are returned unchanged.
    pub fn real_key<'a>(&'a self, key: &'a str) -> &'a str {
        let mut current = key;
        let mut visited = HashSet::new();
        while let Some(next) = self.aliases.get(current) {
            if !visited.insert(current) {
                tracing::warn!(key, "Alias cycle detected, stopping resolution");
                break;
            }
            tracing::debug!(alias = current, target = next.as_str(), "Alias");
            current = next.as_str();
        }
        current
    }

    /// Reports whether `key` is registered as an alias.
    pub fn is_alias(&self, key: &str) -> bool {
        self.aliases.contains_key(key)
    }

    /// Returns the number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true when no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterates over `(alias, target)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }
}
