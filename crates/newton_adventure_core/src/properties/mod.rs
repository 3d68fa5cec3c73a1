//! String property lookup with dotted, namespaced keys.
//!
//! Converters read everything as text, the way the map editor exposes custom
//! properties to exporters: a missing key reads as the empty string and numbers
//! are parsed leniently.

mod text;
pub mod from_tiled;

use std::collections::BTreeMap;

pub use text::FromPropertyText;

/// Custom properties of a map, layer, object or tile.
///
/// Keys are dotted paths (`newton_adventure.platform.friction`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value of `key`, or the empty string when it is not set.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value of `key` when it is set to a non-empty string.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        Some(self.get(key)).filter(|value| !value.is_empty())
    }

    /// Parse a non-empty value. Returns `None` when the key is missing or empty.
    pub fn parse<T: FromPropertyText>(&self, key: &str) -> Option<T> {
        self.get_non_empty(key).map(T::from_text)
    }

    /// Parse a value, falling back to `T::default()` when it is missing or empty.
    pub fn parse_or_default<T: FromPropertyText + Default>(&self, key: &str) -> T {
        self.parse(key).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge property sets in order; later sets override earlier ones on key collision.
    ///
    /// Used for tile objects: tile properties first, then the object's own.
    pub fn merged<'a>(layers: impl IntoIterator<Item = &'a Properties>) -> Properties {
        let mut merged = Properties::new();
        for properties in layers {
            for (key, value) in &properties.values {
                merged.values.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let properties = Properties::new();
        assert_eq!(properties.get("newton_adventure.platform.enabled"), "");
        assert_eq!(properties.get_non_empty("newton_adventure.platform.enabled"), None);
    }

    #[test]
    fn test_parse_skips_empty_values() {
        let properties: Properties = [("friction", ""), ("id", "12")].into_iter().collect();
        assert_eq!(properties.parse::<f32>("friction"), None);
        assert_eq!(properties.parse::<i32>("id"), Some(12));
        assert_eq!(properties.parse_or_default::<i32>("missing"), 0);
    }

    #[test]
    fn test_merged_later_sets_override() {
        let tile: Properties = [("kind", "tile"), ("only_tile", "a")].into_iter().collect();
        let object: Properties = [("kind", "object"), ("only_object", "b")]
            .into_iter()
            .collect();

        let merged = Properties::merged([&tile, &object]);

        assert_eq!(merged.get("kind"), "object");
        assert_eq!(merged.get("only_tile"), "a");
        assert_eq!(merged.get("only_object"), "b");
        assert_eq!(merged.len(), 3);
    }
}
