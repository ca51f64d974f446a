//! Header Index
//!
//! Read-only view over the request headers used by country detection.
//! Built once per resolution so every lookup is case-insensitive without
//! repeated ad hoc comparisons.

use std::collections::{BTreeMap, BTreeSet};

/// Case-insensitive index over request headers.
///
/// Raw names are kept exactly as received (ordered lexicographically) so
/// that scans are deterministic. A second map keyed by the lowercase name
/// lists every raw casing of the same header.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    raw: BTreeMap<String, Vec<String>>,
    lowercase: BTreeMap<String, BTreeSet<String>>,
}

impl HeaderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(name, value)` pairs.
    ///
    /// Repeated names accumulate values in arrival order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut index = Self::new();
        for (name, value) in pairs {
            index.insert(name, value);
        }
        index
    }

    /// Build an index from an `http` header map.
    ///
    /// Values that are not valid visible ASCII are skipped.
    pub fn from_http(headers: &axum::http::HeaderMap) -> Self {
        Self::from_pairs(
            headers
                .iter()
                .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?))),
        )
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.lowercase
            .entry(name.to_lowercase())
            .or_default()
            .insert(name.clone());
        self.raw.entry(name).or_default().push(value.into());
    }

    /// Values stored under exactly `name` (case-sensitive).
    pub fn get_exact(&self, name: &str) -> &[String] {
        self.raw.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every raw casing of `name` with its values.
    ///
    /// Entries come in lexicographic order of the raw names, independent
    /// of the order headers were inserted.
    pub fn matching<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, &'a [String])> {
        self.lowercase
            .get(&name.to_lowercase())
            .into_iter()
            .flatten()
            .map(move |raw| (raw.as_str(), self.get_exact(raw)))
    }

    /// First value for `name`, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.matching(name)
            .find_map(|(_, values)| values.first())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lowercase.contains_key(&name.to_lowercase())
    }

    /// Raw header entries in lexicographic order of their names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.raw.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Raw header names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
