//! Memoized filter → sort → group pipeline over one collection.

use crate::facets::{available_categories, available_types};
use crate::filtering::apply_filters;
use crate::grouping::group_items;
use crate::models::{CategoryGroup, Facet, FilterState, FilterUpdate, SultanOrderMap};
use crate::normalize::BanknoteLike;
use crate::sorting::sort_items;
use std::collections::HashSet;
use tracing::debug;

/// Check whether applying `update` would change `current`
///
/// Selections compare as sets, sort rules element-wise in order.
pub fn filters_changed(current: &FilterState, update: &FilterUpdate) -> bool {
    let search_changed = update
        .search
        .as_ref()
        .is_some_and(|s| *s != current.search);
    let sort_changed = update.sort.as_ref().is_some_and(|s| *s != current.sort);

    search_changed
        || sort_changed
        || selection_changed(&current.categories, update.categories.as_deref())
        || selection_changed(&current.types, update.types.as_deref())
        || selection_changed(&current.countries, update.countries.as_deref())
}

fn selection_changed(current: &[String], proposed: Option<&[String]>) -> bool {
    match proposed {
        Some(proposed) => {
            let a: HashSet<&String> = current.iter().collect();
            let b: HashSet<&String> = proposed.iter().collect();
            a != b
        }
        None => false,
    }
}

impl FilterState {
    /// Merge a partial update; returns false and leaves the state alone
    /// when nothing would change
    pub fn apply_update(&mut self, update: FilterUpdate) -> bool {
        if !filters_changed(self, &update) {
            return false;
        }

        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(types) = update.types {
            self.types = types;
        }
        if let Some(countries) = update.countries {
            self.countries = countries;
        }
        if let Some(sort) = update.sort {
            self.sort = sort;
        }
        true
    }
}

/// Derived state of a collection under the current filter selection
///
/// Results are recomputed eagerly when an input changes and served from
/// cache otherwise.
#[derive(Debug, Clone)]
pub struct CollectionView<T> {
    items: Vec<T>,
    filters: FilterState,
    sultan_order: Option<SultanOrderMap>,
    matched: Vec<T>,
    filtered: Vec<T>,
    grouped: Vec<CategoryGroup<T>>,
    categories: Vec<Facet>,
    types: Vec<Facet>,
    generation: u64,
}

impl<T: BanknoteLike + Clone> CollectionView<T> {
    pub fn new(items: Vec<T>, filters: FilterState) -> Self {
        let mut view = Self {
            items,
            filters,
            sultan_order: None,
            matched: Vec::new(),
            filtered: Vec::new(),
            grouped: Vec::new(),
            categories: Vec::new(),
            types: Vec::new(),
            generation: 0,
        };
        view.refresh_facets();
        view.refresh();
        view
    }

    pub fn with_sultan_order(mut self, sultan_order: SultanOrderMap) -> Self {
        self.set_sultan_order(Some(sultan_order));
        self
    }

    /// Apply a partial filter update; recomputes only on a real change
    pub fn update_filters(&mut self, update: FilterUpdate) -> bool {
        if !self.filters.apply_update(update) {
            debug!(generation = self.generation, "filter update unchanged, keeping cached view");
            return false;
        }
        self.refresh();
        true
    }

    /// Replace the source collection
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh_facets();
        self.refresh();
    }

    /// Replace the sultan rank table; only the grouping depends on it
    pub fn set_sultan_order(&mut self, sultan_order: Option<SultanOrderMap>) {
        if self.sultan_order == sultan_order {
            return;
        }
        self.sultan_order = sultan_order;
        self.regroup();
        self.generation += 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sultan_order(&self) -> Option<&SultanOrderMap> {
        self.sultan_order.as_ref()
    }

    /// Filtered items in sort order
    pub fn filtered_items(&self) -> &[T] {
        &self.filtered
    }

    pub fn grouped_items(&self) -> &[CategoryGroup<T>] {
        &self.grouped
    }

    pub fn available_categories(&self) -> &[Facet] {
        &self.categories
    }

    pub fn available_types(&self) -> &[Facet] {
        &self.types
    }

    /// Number of recomputations so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn refresh(&mut self) {
        self.matched = apply_filters(&self.items, &self.filters);
        self.filtered = self.matched.clone();
        sort_items(&mut self.filtered, &self.filters.sort);
        self.regroup();
        self.generation += 1;

        debug!(
            generation = self.generation,
            total = self.items.len(),
            matched = self.filtered.len(),
            groups = self.grouped.len(),
            "recomputed collection view"
        );
    }

    // Grouped from the unsorted filter output so categories keep their
    // upstream order.
    fn regroup(&mut self) {
        self.grouped = group_items(&self.matched, &self.filters.sort, self.sultan_order.as_ref());
    }

    fn refresh_facets(&mut self) {
        self.categories = available_categories(&self.items);
        self.types = available_types(&self.items);
    }
}
