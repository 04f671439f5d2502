//! Ordered map type for JSON objects.
//!
//! This module provides [`JsonMap`], a wrapper around [`IndexMap`] that keeps
//! object entries in insertion order while comparing order-insensitively.
//! Canonical serialization sorts keys lexicographically via
//! [`JsonMap::sorted_iter`], so insertion order never leaks into encoded
//! output.
//!
//! ## Why IndexMap?
//!
//! `IndexMap` gives deterministic iteration (important for reproducible error
//! ordering and debugging) while its `PartialEq` compares as a map, ignoring
//! entry order — exactly the equality the value model requires.
//!
//! ## Examples
//!
//! ```rust
//! use bijson::{JsonMap, JsonValue};
//!
//! let mut map = JsonMap::new();
//! map.insert("name".to_string(), JsonValue::from("Alice"));
//! map.insert("age".to_string(), JsonValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// A map of string keys to JSON values.
///
/// A thin wrapper around [`IndexMap`]. Two maps are equal when they hold the
/// same key/value pairs, regardless of insertion order.
///
/// # Examples
///
/// ```rust
/// use bijson::{JsonMap, JsonValue};
///
/// let mut a = JsonMap::new();
/// a.insert("x".to_string(), JsonValue::from(1));
/// a.insert("y".to_string(), JsonValue::from(2));
///
/// let mut b = JsonMap::new();
/// b.insert("y".to_string(), JsonValue::from(2));
/// b.insert("x".to_string(), JsonValue::from(1));
///
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonMap(IndexMap<String, crate::JsonValue>);

impl JsonMap {
    /// Creates an empty `JsonMap`.
    #[must_use]
    pub fn new() -> Self {
        JsonMap(IndexMap::new())
    }

    /// Creates an empty `JsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        JsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: crate::JsonValue) -> Option<crate::JsonValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::JsonValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::JsonValue> {
        self.0.get_mut(key)
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// Preserves the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::JsonValue> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::JsonValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::JsonValue> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::JsonValue> {
        self.0.iter()
    }

    /// Returns the entries of the map in lexicographic key order.
    ///
    /// Canonical encoding and deterministic map parsing both iterate in this
    /// order, never in insertion order.
    pub fn sorted_iter(&self) -> impl Iterator<Item = (&String, &crate::JsonValue)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter()
    }

    /// Returns the keys of the map in lexicographic order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl From<HashMap<String, crate::JsonValue>> for JsonMap {
    fn from(map: HashMap<String, crate::JsonValue>) -> Self {
        JsonMap(map.into_iter().collect())
    }
}

impl From<JsonMap> for HashMap<String, crate::JsonValue> {
    fn from(map: JsonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for JsonMap {
    type Item = (String, crate::JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonMap {
    type Item = (&'a String, &'a crate::JsonValue);
    type IntoIter = indexmap::map::Iter<'a, String, crate::JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::JsonValue)> for JsonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::JsonValue)>>(iter: T) -> Self {
        JsonMap(IndexMap::from_iter(iter))
    }
}
