//! Label sets: ordered name/value mappings used as series keys.
//!
//! A `LabelSet` is immutable once constructed. Ordering and equality are by
//! full key/value content so it can key a `BTreeMap` and renders in a
//! deterministic, reproducible order regardless of insertion order.

use std::collections::BTreeMap;

/// Ordered label name → value mapping.
///
/// The empty set is the "default" label combination every typed metric
/// exposes through its shortcut methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelSet {
    labels: BTreeMap<String, String>,
}

impl LabelSet {
    /// Empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, value) pairs. Later duplicates overwrite earlier
    /// ones, keeping keys unique within the set.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style: add one label and return the set.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Value for a label name, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Iterate pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True iff every (name, value) pair of `self` also appears in `other`.
    ///
    /// Used only for subset-style bulk removal, never for lookup.
    pub fn is_subset_of(&self, other: &LabelSet) -> bool {
        self.labels
            .iter()
            .all(|(k, v)| other.labels.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
