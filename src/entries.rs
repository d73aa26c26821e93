//! Ordered key/value store of a SLON block.
//!
//! [`Entries`] wraps an [`IndexMap`] so that keys iterate in first-insertion
//! order. Re-setting an existing key replaces its value in place; the key
//! keeps its original position.
//!
//! ## Examples
//!
//! ```rust
//! use slon::Entries;
//!
//! let mut entries = Entries::new();
//! entries.insert("a", "1");
//! entries.insert("b", "2");
//! entries.insert("a", "3");
//!
//! let keys: Vec<_> = entries.keys().collect();
//! assert_eq!(keys, vec!["a", "b"]);
//! assert_eq!(entries.get("a"), Some("3"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered map of string keys to string values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries(IndexMap<String, String>);

impl Entries {
    #[must_use]
    pub fn new() -> Self {
        Entries(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Entries(IndexMap::with_capacity(capacity))
    }

    /// Inserts or updates a pair, returning the previous value for the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slon::Entries;
    ///
    /// let mut entries = Entries::new();
    /// assert!(entries.insert("key", "1").is_none());
    /// assert_eq!(entries.insert("key", "2").as_deref(), Some("1"));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a pair; the remaining keys keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// `IndexMap` equality ignores order; two blocks are only equal with the same pair order.
impl PartialEq for Entries {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Entries {}

impl IntoIterator for Entries {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Entries {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k, v);
        }
        entries
    }
}
