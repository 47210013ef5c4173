//! Taxonomy reference lists backing the filter menus.
//!
//! Each filter dimension is backed by a read-only list of
//! `{ key, display_name }` entries fetched from the search index. A key may
//! pipe-join several raw values that share one display label (a synonym
//! group), e.g. an initiative known under two names:
//! `"Young African Leaders Initiative|Young African Leaders Initiative Network"`.
//! Selecting or removing any member of the group acts on the whole group.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Delimiter joining synonym values inside a taxonomy key.
pub const SYNONYM_DELIMITER: char = '|';

/// One reference entry: a matchable key and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub key: String,
    pub display_name: String,
}

impl TaxonomyEntry {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }

    /// The raw values this entry matches: the key split on the synonym
    /// delimiter. A key without a delimiter yields a single value.
    pub fn synonym_values(&self) -> Vec<&str> {
        self.key.split(SYNONYM_DELIMITER).collect()
    }

    /// Whether this entry matches a raw filter value. Matching is exact
    /// against each synonym value, never substring.
    pub fn matches(&self, value: &str) -> bool {
        self.key.split(SYNONYM_DELIMITER).any(|v| v == value)
    }
}

/// An ordered reference list for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyList {
    pub entries: Vec<TaxonomyEntry>,
}

impl TaxonomyList {
    pub fn new(entries: Vec<TaxonomyEntry>) -> Self {
        Self { entries }
    }

    /// Find the entry whose synonym values contain `value`.
    pub fn find(&self, value: &str) -> Option<&TaxonomyEntry> {
        self.entries.iter().find(|e| e.matches(value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// All reference lists, keyed by list name (`postTypes`, `dates`,
/// `categories`, `sources`, `languages`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalTaxonomies {
    lists: HashMap<String, TaxonomyList>,
}

impl GlobalTaxonomies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, list: TaxonomyList) {
        self.lists.insert(name.into(), list);
    }

    /// Builder-style insertion, convenient for tests and fixtures.
    pub fn with_list(mut self, name: impl Into<String>, list: TaxonomyList) -> Self {
        self.insert(name, list);
        self
    }

    pub fn list(&self, name: &str) -> Option<&TaxonomyList> {
        self.lists.get(name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{GlobalTaxonomies, TaxonomyEntry, TaxonomyList};

    #[test]
    fn matches_is_exact_per_synonym_value() {
        let entry = TaxonomyEntry::new("YALI|YLAI", "Young Leaders");
        assert!(entry.matches("YALI"));
        assert!(entry.matches("YLAI"));
        assert!(!entry.matches("YA"));
        assert!(!entry.matches("YALI|YLAI|extra"));
    }

    #[test]
    fn single_value_key_matches_itself_only() {
        let entry = TaxonomyEntry::new("video", "Video");
        assert!(entry.matches("video"));
        assert!(!entry.matches("vid"));
        assert_eq!(entry.synonym_values(), vec!["video"]);
    }

    #[test]
    fn synonym_values_split_on_pipe() {
        let entry = TaxonomyEntry::new("YALI|YLAI", "Young Leaders");
        assert_eq!(entry.synonym_values(), vec!["YALI", "YLAI"]);
    }

    #[test]
    fn list_find_returns_first_matching_entry() {
        let list = TaxonomyList::new(vec![
            TaxonomyEntry::new("video", "Video"),
            TaxonomyEntry::new("post", "Article"),
        ]);
        assert_eq!(
            list.find("post").map(|e| e.display_name.as_str()),
            Some("Article")
        );
        assert!(list.find("document").is_none());
    }

    #[test]
    fn global_lookup_by_list_name() {
        let globals = GlobalTaxonomies::new().with_list(
            "postTypes",
            TaxonomyList::new(vec![TaxonomyEntry::new("video", "Video")]),
        );
        assert!(globals.list("postTypes").is_some());
        assert!(globals.list("categories").is_none());
    }

    #[test]
    fn entries_round_trip_through_json() {
        let entry = TaxonomyEntry::new("YALI|YLAI", "Young Leaders");
        let json = serde_json::to_string(&entry).unwrap();
        let back: TaxonomyEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
