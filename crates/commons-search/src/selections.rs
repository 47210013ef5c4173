//! Selection presenter: derives the active filter chips.
//!
//! Chips are ephemeral — generated fresh from `FilterState` x taxonomy on
//! every read, never stored. Display order is the reverse of the canonical
//! dimension declaration order, with each dimension's internal order
//! preserved. Removing a chip removes its entire synonym group from state,
//! since one chip may stand for several underlying raw values.

use commons_core::taxonomy::GlobalTaxonomies;

use crate::dimensions::{Arity, DimensionId, DIMENSIONS};
use crate::state::FilterState;

/// One active filter selection, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChip {
    /// The raw filter value the chip was generated from.
    pub value: String,
    /// Display label resolved from the taxonomy list.
    pub label: String,
    pub dimension: DimensionId,
    /// Whether removing this chip clears the whole (scalar) dimension.
    pub single: bool,
}

/// A filter value that could not be resolved against the taxonomy —
/// typically a stale URL referencing a removed entry. Skipped, not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedValue {
    pub dimension: DimensionId,
    pub value: String,
}

/// Derive the chip list, discarding unresolvable values.
pub fn selections(state: &FilterState, taxonomies: &GlobalTaxonomies) -> Vec<SelectionChip> {
    selections_with_warnings(state, taxonomies).0
}

/// Derive the chip list plus the values that were skipped because no
/// taxonomy entry matched them. Callers surface the skips as warnings.
pub fn selections_with_warnings(
    state: &FilterState,
    taxonomies: &GlobalTaxonomies,
) -> (Vec<SelectionChip>, Vec<SkippedValue>) {
    let mut chips = Vec::new();
    let mut skipped = Vec::new();

    // Reverse declaration order is load-bearing for display.
    for desc in DIMENSIONS.iter().rev() {
        if !desc.user_facing {
            continue;
        }
        let values = state.values(desc.id);
        if values.is_empty() {
            continue;
        }

        let list = desc.reference_list.and_then(|name| taxonomies.list(name));
        let single = desc.arity == Arity::Single;

        let mut batch: Vec<SelectionChip> = Vec::with_capacity(values.len());
        for value in values {
            let entry = list.and_then(|l| l.find(&value));
            let Some(entry) = entry else {
                skipped.push(SkippedValue {
                    dimension: desc.id,
                    value,
                });
                continue;
            };
            let chip = SelectionChip {
                value,
                label: entry.display_name.clone(),
                dimension: desc.id,
                single,
            };
            // De-dup by label within this dimension's batch only: two raw
            // values in one synonym group collapse to one chip.
            if !batch.iter().any(|c| c.label == chip.label) {
                batch.push(chip);
            }
        }
        chips.extend(batch);
    }

    (chips, skipped)
}

/// Remove a chip's selection from the state, returning the updated state.
///
/// The chip's value is resolved back to its taxonomy entry and every value
/// in that entry's synonym group is removed, not just the clicked one. For
/// single-select dimensions the scalar is cleared. The term is untouched;
/// the caller re-encodes the result through the query-string codec.
pub fn remove_selection(
    state: &FilterState,
    taxonomies: &GlobalTaxonomies,
    chip: &SelectionChip,
) -> FilterState {
    let mut next = state.clone();
    let desc = chip.dimension.descriptor();

    let entry = desc
        .reference_list
        .and_then(|name| taxonomies.list(name))
        .and_then(|list| list.find(&chip.value));

    match entry {
        Some(entry) => {
            let synonyms = entry.synonym_values();
            next.remove_values(chip.dimension, &synonyms);
        }
        // Stale chip: fall back to removing the raw value alone.
        None => next.remove_values(chip.dimension, &[chip.value.as_str()]),
    }

    next
}

/// Whether the "clear all" affordance renders alongside the chips.
pub fn shows_clear_all(chips: &[SelectionChip]) -> bool {
    chips.len() > 2
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use commons_core::taxonomy::{GlobalTaxonomies, TaxonomyEntry, TaxonomyList};

    use super::{remove_selection, selections, selections_with_warnings, shows_clear_all};
    use crate::dimensions::DimensionId;
    use crate::state::FilterState;

    fn taxonomies() -> GlobalTaxonomies {
        GlobalTaxonomies::new()
            .with_list(
                "postTypes",
                TaxonomyList::new(vec![
                    TaxonomyEntry::new("video", "Video"),
                    TaxonomyEntry::new("post", "Article"),
                ]),
            )
            .with_list(
                "dates",
                TaxonomyList::new(vec![TaxonomyEntry::new("recent", "Any Time")]),
            )
            .with_list(
                "categories",
                TaxonomyList::new(vec![
                    TaxonomyEntry::new("health", "Global Health"),
                    TaxonomyEntry::new("economy", "Economic Opportunity"),
                ]),
            )
            .with_list(
                "sources",
                TaxonomyList::new(vec![
                    TaxonomyEntry::new("YALI|YLAI", "Young Leaders"),
                    TaxonomyEntry::new("share", "ShareAmerica"),
                ]),
            )
            .with_list(
                "languages",
                TaxonomyList::new(vec![
                    TaxonomyEntry::new("en-us", "English"),
                    TaxonomyEntry::new("fr-fr", "French"),
                ]),
            )
    }

    #[test]
    fn empty_state_yields_no_chips() {
        let chips = selections(&FilterState::new(), &taxonomies());
        assert!(chips.is_empty());
    }

    #[test]
    fn chips_follow_reverse_declaration_order() {
        let mut state = FilterState::new();
        state.add(DimensionId::PostTypes, "video");
        state.add(DimensionId::Date, "recent");
        state.add(DimensionId::Categories, "health");
        state.add(DimensionId::Sources, "share");
        state.add(DimensionId::Language, "fr-fr");

        let chips = selections(&state, &taxonomies());
        let order: Vec<DimensionId> = chips.iter().map(|c| c.dimension).collect();
        assert_eq!(
            order,
            vec![
                DimensionId::Language,
                DimensionId::Sources,
                DimensionId::Categories,
                DimensionId::Date,
                DimensionId::PostTypes,
            ]
        );
    }

    #[test]
    fn dimension_internal_order_is_preserved() {
        let mut state = FilterState::new();
        state.add(DimensionId::Categories, "economy");
        state.add(DimensionId::Categories, "health");

        let chips = selections(&state, &taxonomies());
        let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Economic Opportunity", "Global Health"]);
    }

    #[test]
    fn synonym_group_collapses_to_one_chip() {
        let mut state = FilterState::new();
        state.add(DimensionId::Sources, "YALI");
        state.add(DimensionId::Sources, "YLAI");

        let chips = selections(&state, &taxonomies());
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].label, "Young Leaders");
        assert!(!chips[0].single);
    }

    #[test]
    fn single_select_dimensions_flag_their_chips() {
        let mut state = FilterState::new();
        state.add(DimensionId::Language, "fr-fr");
        state.add(DimensionId::PostTypes, "video");

        let chips = selections(&state, &taxonomies());
        let language = chips
            .iter()
            .find(|c| c.dimension == DimensionId::Language)
            .map(|c| c.single);
        let post_type = chips
            .iter()
            .find(|c| c.dimension == DimensionId::PostTypes)
            .map(|c| c.single);
        assert_eq!(language, Some(true));
        assert_eq!(post_type, Some(false));
    }

    #[test]
    fn stale_values_are_skipped_and_reported() {
        let mut state = FilterState::new();
        state.add(DimensionId::Categories, "health");
        state.add(DimensionId::Categories, "removed-taxonomy-id");

        let (chips, skipped) = selections_with_warnings(&state, &taxonomies());
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].label, "Global Health");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].value, "removed-taxonomy-id");
        assert_eq!(skipped[0].dimension, DimensionId::Categories);
    }

    #[test]
    fn removing_a_synonym_chip_removes_the_whole_group() {
        let mut state = FilterState::new();
        state.add(DimensionId::Sources, "YALI");
        state.add(DimensionId::Sources, "YLAI");
        state.add(DimensionId::Sources, "share");
        state.term = Some("leadership".to_string());

        let chips = selections(&state, &taxonomies());
        let chip = chips
            .iter()
            .find(|c| c.label == "Young Leaders")
            .cloned()
            .expect("young leaders chip");

        let next = remove_selection(&state, &taxonomies(), &chip);
        assert_eq!(next.sources, vec!["share"]);
        assert_eq!(next.term.as_deref(), Some("leadership"));
    }

    #[test]
    fn removing_a_single_select_chip_clears_the_dimension() {
        let mut state = FilterState::new();
        state.add(DimensionId::Language, "fr-fr");

        let chips = selections(&state, &taxonomies());
        let next = remove_selection(&state, &taxonomies(), &chips[0]);
        assert!(next.language.is_none());
    }

    #[test]
    fn clear_all_affordance_requires_more_than_two_chips() {
        let mut state = FilterState::new();
        state.add(DimensionId::Categories, "health");
        state.add(DimensionId::Sources, "share");
        let two = selections(&state, &taxonomies());
        assert_eq!(two.len(), 2);
        assert!(!shows_clear_all(&two));

        state.add(DimensionId::PostTypes, "video");
        let three = selections(&state, &taxonomies());
        assert_eq!(three.len(), 3);
        assert!(shows_clear_all(&three));

        assert!(!shows_clear_all(&[]));
    }
}
