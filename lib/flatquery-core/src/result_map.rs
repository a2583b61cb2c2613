//! Flattened key/value collection.
//!
//! [`ResultMap`] is an ordered-insertion multimap: a key may repeat, its
//! values keep the order in which they were added, and keys keep the order in
//! which they first appeared.
//!
//! # Example
//!
//! ```
//! use flatquery_core::ResultMap;
//!
//! let mut map = ResultMap::new();
//! map.add("tag", "a");
//! map.add("tag", "b");
//! map.add("q", "rust lang");
//!
//! assert_eq!(map.get("tag"), Some("a"));
//! assert_eq!(map.encode(), "q=rust+lang&tag=a&tag=b");
//! ```

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::ToQueryPairs;

/// Ordered-insertion multimap from key to a list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ResultMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Appends several values to the key, preserving their order.
    ///
    /// An empty `values` list still registers the key.
    pub fn append(&mut self, key: impl Into<String>, values: impl IntoIterator<Item = String>) {
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().extend(values),
            Entry::Vacant(entry) => {
                entry.insert(values.into_iter().collect());
            }
        }
    }

    /// Merges another map under `prefix`, joining keys with `separator`.
    ///
    /// Values of colliding keys are appended, never replaced.
    pub fn merge_prefixed(&mut self, prefix: &str, separator: &str, other: ResultMap) {
        for (key, values) in other.entries {
            self.append(format!("{prefix}{separator}{key}"), values);
        }
    }

    /// First value of the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of the key.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// Keys are sorted so the output is stable whatever the input order;
    /// values of one key keep their insertion order.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for key in keys {
            for value in self.get_all(key) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Append every pair to the query string of `url`, in insertion order.
    pub fn append_to_url(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, values) in &self.entries {
            for value in values {
                query.append_pair(key, value);
            }
        }
    }
}

impl ToQueryPairs for ResultMap {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| (key.clone(), value.clone()))
            })
            .collect()
    }
}

impl IntoIterator for ResultMap {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResultMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.add(key, value);
        }
        map
    }
}
