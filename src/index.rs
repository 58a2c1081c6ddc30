// Entity index - country name to the set of prefixes registered to it
//
// Derived once during a store rebuild, persisted inside the store's
// metadata entry, loaded wholesale on open. Read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{CtyError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityIndex {
    entities: BTreeMap<String, BTreeSet<String>>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `prefix` under `country`, creating the country on first use.
    pub(crate) fn add(&mut self, country: &str, prefix: &str) {
        self.entities
            .entry(country.to_string())
            .or_default()
            .insert(prefix.to_string());
    }

    /// True iff `country` appears in the index.
    pub fn is_entity(&self, country: &str) -> bool {
        self.entities.contains_key(country)
    }

    /// All prefixes registered to `country`.
    pub fn prefixes_of(&self, country: &str) -> Result<&BTreeSet<String>> {
        self.entities
            .get(country)
            .ok_or_else(|| CtyError::NotFound(country.to_string()))
    }

    /// Country names, in sorted order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> EntityIndex {
        let mut index = EntityIndex::new();
        index.add("United States", "K");
        index.add("United States", "W");
        index.add("Hawaii", "KH6");
        index
    }

    #[test]
    fn test_is_entity() {
        let index = sample_index();
        assert!(index.is_entity("United States"));
        assert!(index.is_entity("Hawaii"));
        assert!(!index.is_entity("Atlantis"));
    }

    #[test]
    fn test_prefixes_of() {
        let index = sample_index();
        let prefixes = index.prefixes_of("United States").unwrap();
        assert_eq!(prefixes.len(), 2);
        assert!(prefixes.contains("K"));
        assert!(prefixes.contains("W"));
    }

    #[test]
    fn test_unknown_country_not_found() {
        let index = sample_index();
        assert!(matches!(
            index.prefixes_of("Atlantis"),
            Err(CtyError::NotFound(_))
        ));
    }

    #[test]
    fn test_entities_sorted() {
        let index = sample_index();
        let names: Vec<&str> = index.entities().collect();
        assert_eq!(names, vec!["Hawaii", "United States"]);
    }
}
