// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descent into nested mapping values along a key path.

use crate::domain::ConfigValue;

/// Walks `path` down from `root`, one mapping level per segment.
///
/// An empty path yields `root` itself. A missing segment yields `None`. Reaching a
/// value that is not a mapping ends the walk with that value, even when segments
/// remain.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{ConfigValue, ValueMap};
/// use layercfg::service::path_resolver::search_map;
///
/// let mut inner = ValueMap::new();
/// inner.insert("c".to_string(), ConfigValue::from(5));
/// let mut outer = ValueMap::new();
/// outer.insert("b".to_string(), ConfigValue::Map(inner));
/// let root = ConfigValue::Map(outer);
///
/// assert_eq!(search_map(&root, &["b", "c"]), Some(&ConfigValue::from(5)));
/// assert_eq!(search_map(&root, &["b", "c", "d"]), Some(&ConfigValue::from(5)));
/// assert_eq!(search_map(&root, &["x"]), None);
/// ```
pub fn search_map<'a>(root: &'a ConfigValue, path: &[&str]) -> Option<&'a ConfigValue> {
    let Some((first, rest)) = path.split_first() else {
        return Some(root);
    };
    match root {
        ConfigValue::Map(map) => search_map(map.get(*first)?, rest),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueMap;

    fn nested() -> ConfigValue {
        let mut c = ValueMap::new();
        c.insert("c".to_string(), ConfigValue::from(5));
        let mut b = ValueMap::new();
        b.insert("b".to_string(), ConfigValue::Map(c));
        b.insert("flat".to_string(), ConfigValue::from("x"));
        ConfigValue::Map(b)
    }

    #[test]
    fn test_empty_path_returns_root() {
        let root = nested();
        assert_eq!(search_map(&root, &[]), Some(&root));
    }

    #[test]
    fn test_descends_to_leaf() {
        let root = nested();
        assert_eq!(search_map(&root, &["b", "c"]), Some(&ConfigValue::from(5)));
    }

    #[test]
    fn test_intermediate_mapping() {
        let root = nested();
        let b = search_map(&root, &["b"]).unwrap();
        assert!(b.as_map().unwrap().contains_key("c"));
    }

    #[test]
    fn test_missing_segment() {
        let root = nested();
        assert_eq!(search_map(&root, &["b", "x"]), None);
        assert_eq!(search_map(&root, &["nope", "c"]), None);
    }

    #[test]
    fn test_scalar_short_circuits() {
        let root = nested();
        assert_eq!(
            search_map(&root, &["flat", "more", "segments"]),
            Some(&ConfigValue::from("x"))
        );
    }
}
