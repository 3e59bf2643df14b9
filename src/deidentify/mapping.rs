//! Reversible original <-> placeholder mapping

use std::collections::{BTreeMap, HashMap};
use zeroize::Zeroize;

/// Mapping table owned by one engine instance
///
/// An original maps to at most one placeholder and a placeholder maps to
/// exactly one original. Stored originals are wiped from memory on
/// [`MappingStore::reset`] and on drop.
#[derive(Debug, Default)]
pub struct MappingStore {
    forward: BTreeMap<String, String>,
    by_placeholder: HashMap<String, String>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a saved `original -> placeholder` table
    pub fn from_mappings(mappings: BTreeMap<String, String>) -> Self {
        let mut store = Self::new();
        for (original, placeholder) in mappings {
            store.insert(original, placeholder);
        }
        store
    }

    /// Placeholder previously assigned to `original`
    pub fn get(&self, original: &str) -> Option<&str> {
        self.forward.get(original).map(String::as_str)
    }

    /// Original behind `placeholder`
    pub fn original_for(&self, placeholder: &str) -> Option<&str> {
        self.by_placeholder.get(placeholder).map(String::as_str)
    }

    /// Record a mapping
    ///
    /// An existing mapping for the same original is replaced and its old
    /// placeholder retired.
    pub fn insert(&mut self, original: String, placeholder: String) {
        if let Some(mut old) = self.forward.insert(original.clone(), placeholder.clone()) {
            if let Some(mut stale) = self.by_placeholder.remove(&old) {
                stale.zeroize();
            }
            old.zeroize();
        }
        self.by_placeholder.insert(placeholder, original);
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Placeholders currently in use
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.by_placeholder.keys().map(String::as_str)
    }

    /// Restore originals in a deidentified text
    ///
    /// Every literal occurrence of each known placeholder is replaced by its
    /// original. Placeholders are bracketed and carry unique counters, so no
    /// placeholder is a substring of another and application order does not
    /// matter. Text without known placeholders is returned unchanged.
    pub fn reverse(&self, text: &str) -> String {
        self.by_placeholder
            .iter()
            .fold(text.to_string(), |acc, (placeholder, original)| {
                if acc.contains(placeholder.as_str()) {
                    acc.replace(placeholder.as_str(), original)
                } else {
                    acc
                }
            })
    }

    /// Copy of the `original -> placeholder` table
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.forward.clone()
    }

    /// Drop every mapping, wiping stored originals
    pub fn reset(&mut self) {
        for (mut original, mut placeholder) in std::mem::take(&mut self.forward) {
            original.zeroize();
            placeholder.zeroize();
        }
        for (mut placeholder, mut original) in std::mem::take(&mut self.by_placeholder) {
            placeholder.zeroize();
            original.zeroize();
        }
    }
}

impl Drop for MappingStore {
    fn drop(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MappingStore {
        let mut store = MappingStore::new();
        store.insert("jane@example.com".to_string(), "[EMAIL_1_95%]".to_string());
        store.insert("Jane Doe".to_string(), "[NAME_1_95%]".to_string());
        store.insert("John Roe".to_string(), "[NAME_10_95%]".to_string());
        store
    }

    #[test]
    fn test_get_and_lookup() {
        let store = sample();
        assert_eq!(store.get("Jane Doe"), Some("[NAME_1_95%]"));
        assert_eq!(store.original_for("[EMAIL_1_95%]"), Some("jane@example.com"));
        assert_eq!(store.get("nobody"), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reverse_restores_all_occurrences() {
        let store = sample();
        let text = "[NAME_1_95%] and [NAME_10_95%] share [EMAIL_1_95%]; bye [NAME_1_95%]";
        assert_eq!(
            store.reverse(text),
            "Jane Doe and John Roe share jane@example.com; bye Jane Doe"
        );
    }

    #[test]
    fn test_reverse_without_placeholders_is_noop() {
        let store = sample();
        assert_eq!(store.reverse("nothing to see [NAME_2]"), "nothing to see [NAME_2]");
    }

    #[test]
    fn test_reset_clears() {
        let mut store = sample();
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.placeholders().count(), 0);
        assert_eq!(store.reverse("[NAME_1_95%]"), "[NAME_1_95%]");
    }

    #[test]
    fn test_from_mappings_round_trip() {
        let store = MappingStore::from_mappings(sample().snapshot());
        assert_eq!(store.original_for("[NAME_10_95%]"), Some("John Roe"));
    }
}
