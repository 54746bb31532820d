use crate::models::{Banknote, FilterState};
use crate::normalize::{get_banknote, normalize_type, slugify, BanknoteLike, DEFAULT_TYPE};
use tracing::trace;

/// Split a comma-separated selection into trimmed, non-empty values
pub fn parse_selection(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply filters to a list of items, returning only those that match
///
/// With no active criterion the input comes back untouched, including
/// items whose banknote cannot be resolved.
pub fn apply_filters<T: BanknoteLike + Clone>(items: &[T], filters: &FilterState) -> Vec<T> {
    if !has_filters(filters) {
        trace!(count = items.len(), "no active filters, passing items through");
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| matches_filters(*item, filters))
        .cloned()
        .collect()
}

/// Check if an item matches the given filters
/// AND between criteria, OR within a criterion's selected values
pub fn matches_filters<T: BanknoteLike + ?Sized>(item: &T, filters: &FilterState) -> bool {
    let Some(banknote) = get_banknote(item) else {
        return false;
    };

    matches_search(banknote, &filters.search)
        && matches_named_value(banknote.series.as_deref(), &filters.categories)
        && matches_type(banknote, &filters.types)
        && matches_named_value(banknote.country.as_deref(), &filters.countries)
}

/// Check if any criterion is active
pub fn has_filters(filters: &FilterState) -> bool {
    !filters.search.is_empty()
        || !filters.categories.is_empty()
        || !filters.types.is_empty()
        || !filters.countries.is_empty()
}

/// Case-insensitive substring search over every string field
pub fn matches_search(banknote: &Banknote, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    banknote
        .string_fields()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Slug or case-insensitive name match against the selected ids
/// An empty selection matches everything; a missing value matches nothing else
pub fn matches_named_value(value: Option<&str>, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }

    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return false;
    };

    let slug = slugify(value);
    let lower = value.to_lowercase();
    selected
        .iter()
        .any(|id| *id == slug || id.to_lowercase() == lower)
}

/// Canonical type comparison, untyped notes count as issued notes
pub fn matches_type(banknote: &Banknote, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }

    let raw = banknote
        .note_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TYPE);
    let normalized = normalize_type(raw);

    selected
        .iter()
        .any(|t| normalized == t.to_lowercase() || normalized == normalize_type(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogEntry, CollectionItem};
    use serde_json::json;

    fn catalog() -> Vec<CatalogEntry> {
        serde_json::from_value(json!([
            {"id": "n1", "series": "Abdul Hamid II", "type": "Issued Note",
             "country": "Ottoman Empire", "denomination": "1 Lira", "signature": "Zühdü"},
            {"id": "n2", "series": "First Kaime", "type": "Specimen",
             "country": "Ottoman Empire", "denomination": "50 Kurush"},
            {"id": "c1", "banknote": {"id": "n3", "series": "Republic", "country": "Turkey"}},
            {"id": "c2", "banknote": null}
        ]))
        .unwrap()
    }

    fn ids(items: &[CatalogEntry]) -> Vec<String> {
        items
            .iter()
            .map(|i| get_banknote(i).map(|b| b.id.clone()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let items = catalog();
        let filtered = apply_filters(&items, &FilterState::default());
        assert_eq!(filtered, items);
    }

    #[test]
    fn test_unresolvable_items_drop_once_filtering() {
        let items = catalog();
        let filters = FilterState {
            countries: vec!["ottoman-empire".to_string(), "turkey".to_string()],
            ..Default::default()
        };

        let filtered = apply_filters(&items, &filters);
        assert_eq!(ids(&filtered), vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_category_slug_and_name_equivalence() {
        let items = catalog();

        for selection in ["abdul-hamid-ii", "Abdul Hamid II", "abdul hamid ii"] {
            let filters = FilterState {
                categories: vec![selection.to_string()],
                ..Default::default()
            };
            assert_eq!(ids(&apply_filters(&items, &filters)), vec!["n1"], "{}", selection);
        }
    }

    #[test]
    fn test_type_filter_uses_canonical_types() {
        let items = catalog();

        let filters = FilterState {
            types: vec!["specimens".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&items, &filters)), vec!["n2"]);

        // Untyped notes default to issued notes
        let filters = FilterState {
            types: vec!["Issued note".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&items, &filters)), vec!["n1", "n3"]);
    }

    #[test]
    fn test_search_scans_extra_fields_case_insensitively() {
        let items = catalog();

        let filters = FilterState {
            search: "zÜHDÜ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&items, &filters)), vec!["n1"]);

        let filters = FilterState {
            search: "kurush".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&items, &filters)), vec!["n2"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let items = catalog();
        let filters = FilterState {
            search: "lira".to_string(),
            categories: vec!["first-kaime".to_string()],
            ..Default::default()
        };
        assert!(apply_filters(&items, &filters).is_empty());
    }

    #[test]
    fn test_missing_series_never_matches_category_filter() {
        let item = CollectionItem {
            banknote: Some(Banknote::default()),
            ..Default::default()
        };
        let filters = FilterState {
            categories: vec!["".to_string()],
            ..Default::default()
        };
        assert!(!matches_filters(&item, &filters));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection(" first-kaime, ,Republic "),
            vec!["first-kaime".to_string(), "Republic".to_string()]
        );
        assert!(parse_selection("").is_empty());
    }
}
