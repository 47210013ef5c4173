//! The filter state store.
//!
//! Holds the currently selected filter values for a results-page view.
//! Presentation code never mutates the fields directly; all changes go
//! through the operations below so the derived chip list and the encoded
//! query string always agree with the state.

use serde::{Deserialize, Serialize};

use crate::dimensions::DimensionId;

/// Mutable view of one dimension's storage.
enum Slot<'a> {
    Multi(&'a mut Vec<String>),
    Single(&'a mut Option<String>),
}

/// Selected filter values plus the free-text term and sort order.
///
/// Multi-select dimensions are ordered sequences without duplicates;
/// single-select dimensions are scalars. `date_from`/`date_to` are
/// state-internal bounds that never reach the query string or the chip
/// list. `term` and `sort_by` are not dimensions: they carry the search
/// box and sort dropdown, and survive `clear_all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub post_types: Vec<String>,
    pub date: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub categories: Vec<String>,
    pub sources: Vec<String>,
    pub language: Option<String>,
    pub term: Option<String>,
    pub sort_by: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dimension's value normalized to a sequence: scalars wrap into a
    /// one-element sequence, absent scalars into an empty one.
    pub fn values(&self, dimension: DimensionId) -> Vec<String> {
        match dimension {
            DimensionId::PostTypes => self.post_types.clone(),
            DimensionId::Categories => self.categories.clone(),
            DimensionId::Sources => self.sources.clone(),
            DimensionId::Date => self.date.clone().into_iter().collect(),
            DimensionId::DateFrom => self.date_from.clone().into_iter().collect(),
            DimensionId::DateTo => self.date_to.clone().into_iter().collect(),
            DimensionId::Language => self.language.clone().into_iter().collect(),
        }
    }

    /// Replace a dimension's value wholesale. Multi dimensions are
    /// de-duplicated preserving first occurrence; single dimensions take
    /// the first value and ignore the rest.
    pub fn set(&mut self, dimension: DimensionId, values: Vec<String>) {
        match self.slot_mut(dimension) {
            Slot::Multi(slot) => {
                let mut deduped: Vec<String> = Vec::with_capacity(values.len());
                for v in values {
                    if !v.is_empty() && !deduped.contains(&v) {
                        deduped.push(v);
                    }
                }
                *slot = deduped;
            }
            Slot::Single(slot) => {
                *slot = values.into_iter().find(|v| !v.is_empty());
            }
        }
    }

    /// Add one value. Idempotent for multi dimensions (adding a present
    /// value is a no-op); replaces the scalar for single dimensions.
    pub fn add(&mut self, dimension: DimensionId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        match self.slot_mut(dimension) {
            Slot::Multi(slot) => {
                if !slot.contains(&value) {
                    slot.push(value);
                }
            }
            Slot::Single(slot) => *slot = Some(value),
        }
    }

    /// Remove every listed value from the dimension (set difference).
    /// For single dimensions the scalar is cleared when it matches any
    /// listed value.
    pub fn remove_values(&mut self, dimension: DimensionId, values: &[&str]) {
        match self.slot_mut(dimension) {
            Slot::Multi(slot) => {
                slot.retain(|v| !values.contains(&v.as_str()));
            }
            Slot::Single(slot) => {
                if let Some(current) = slot.as_deref() {
                    if values.contains(&current) {
                        *slot = None;
                    }
                }
            }
        }
    }

    /// Reset every dimension to its empty default. The term and sort order
    /// are left alone; clearing those is the navigation caller's concern.
    pub fn clear_all(&mut self) {
        self.post_types.clear();
        self.date = None;
        self.date_from = None;
        self.date_to = None;
        self.categories.clear();
        self.sources.clear();
        self.language = None;
    }

    /// Whether no dimension holds a value (term and sort ignored).
    pub fn is_empty(&self) -> bool {
        self.post_types.is_empty()
            && self.date.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.categories.is_empty()
            && self.sources.is_empty()
            && self.language.is_none()
    }

    fn slot_mut(&mut self, dimension: DimensionId) -> Slot<'_> {
        match dimension {
            DimensionId::PostTypes => Slot::Multi(&mut self.post_types),
            DimensionId::Categories => Slot::Multi(&mut self.categories),
            DimensionId::Sources => Slot::Multi(&mut self.sources),
            DimensionId::Date => Slot::Single(&mut self.date),
            DimensionId::DateFrom => Slot::Single(&mut self.date_from),
            DimensionId::DateTo => Slot::Single(&mut self.date_to),
            DimensionId::Language => Slot::Single(&mut self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::FilterState;
    use crate::dimensions::DimensionId;

    #[test]
    fn add_is_idempotent_for_multi_dimensions() {
        let mut state = FilterState::new();
        state.add(DimensionId::Categories, "health");
        state.add(DimensionId::Categories, "health");
        state.add(DimensionId::Categories, "economy");
        assert_eq!(state.categories, vec!["health", "economy"]);
    }

    #[test]
    fn add_replaces_single_dimension_scalar() {
        let mut state = FilterState::new();
        state.add(DimensionId::Language, "en-us");
        state.add(DimensionId::Language, "fr-fr");
        assert_eq!(state.language.as_deref(), Some("fr-fr"));
    }

    #[test]
    fn set_dedupes_and_drops_empty_values() {
        let mut state = FilterState::new();
        state.set(
            DimensionId::Sources,
            vec![
                "shareamerica".to_string(),
                String::new(),
                "shareamerica".to_string(),
                "yali".to_string(),
            ],
        );
        assert_eq!(state.sources, vec!["shareamerica", "yali"]);
    }

    #[test]
    fn remove_values_takes_set_difference() {
        let mut state = FilterState::new();
        state.set(
            DimensionId::Categories,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        state.remove_values(DimensionId::Categories, &["a", "c"]);
        assert_eq!(state.categories, vec!["b"]);
    }

    #[test]
    fn remove_values_clears_matching_scalar() {
        let mut state = FilterState::new();
        state.add(DimensionId::Date, "recent");
        state.remove_values(DimensionId::Date, &["recent"]);
        assert!(state.date.is_none());

        state.add(DimensionId::Date, "recent");
        state.remove_values(DimensionId::Date, &["year"]);
        assert_eq!(state.date.as_deref(), Some("recent"));
    }

    #[test]
    fn clear_all_resets_dimensions_but_keeps_term_and_sort() {
        let mut state = FilterState {
            post_types: vec!["video".to_string()],
            date: Some("recent".to_string()),
            date_from: Some("2019-01-01".to_string()),
            date_to: Some("2019-12-31".to_string()),
            categories: vec!["health".to_string()],
            sources: vec!["yali".to_string()],
            language: Some("fr-fr".to_string()),
            term: Some("ebola".to_string()),
            sort_by: Some("relevance".to_string()),
        };
        state.clear_all();
        assert!(state.is_empty());
        assert_eq!(state.term.as_deref(), Some("ebola"));
        assert_eq!(state.sort_by.as_deref(), Some("relevance"));
    }

    #[test]
    fn state_serializes_with_camel_case_keys() {
        let mut state = FilterState::new();
        state.add(DimensionId::PostTypes, "video");
        state.sort_by = Some("relevance".to_string());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["postTypes"][0], "video");
        assert_eq!(json["sortBy"], "relevance");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let state: FilterState = serde_json::from_str("{}").unwrap();
        assert!(state.is_empty());
        assert!(state.term.is_none());

        let state: FilterState =
            serde_json::from_str(r#"{"categories":["health"]}"#).unwrap();
        assert_eq!(state.categories, vec!["health"]);
    }

    #[test]
    fn values_wraps_scalars_into_sequences() {
        let mut state = FilterState::new();
        assert!(state.values(DimensionId::Date).is_empty());
        state.add(DimensionId::Date, "recent");
        assert_eq!(state.values(DimensionId::Date), vec!["recent"]);
    }
}
