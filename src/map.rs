//! Ordered map type for PLOON objects.
//!
//! This module provides [`PloonMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for object fields. Insertion order is a hard
//! invariant of the codec: schema inference derives its field list from the
//! first-seen order of keys, so the object map must never reorder them.
//!
//! ## Why IndexMap?
//!
//! PLOON uses `IndexMap` instead of `HashMap` to ensure:
//!
//! - **Deterministic output**: the same value tree always renders the same
//!   schema and record text
//! - **Iteration order**: fields are iterated in insertion order
//! - **Positional decoding**: the decoder binds values back by position, so
//!   field order must survive a round trip
//!
//! ## Examples
//!
//! ```rust
//! use ploon::{PloonMap, Value};
//!
//! let mut map = PloonMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to PLOON values.
///
/// # Examples
///
/// ```rust
/// use ploon::{PloonMap, Value};
///
/// let mut map = PloonMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PloonMap(IndexMap<String, crate::Value>);

impl PloonMap {
    /// Creates an empty `PloonMap`.
    #[must_use]
    pub fn new() -> Self {
        PloonMap(IndexMap::new())
    }

    /// Creates an empty `PloonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PloonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the first key-value pair by insertion order.
    ///
    /// Schema inference uses this to pick the governing collection of an
    /// object root.
    #[must_use]
    pub fn first(&self) -> Option<(&String, &crate::Value)> {
        self.0.first()
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for PloonMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        PloonMap(map.into_iter().collect())
    }
}

impl From<PloonMap> for HashMap<String, crate::Value> {
    fn from(map: PloonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for PloonMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PloonMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for PloonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        PloonMap(IndexMap::from_iter(iter))
    }
}
