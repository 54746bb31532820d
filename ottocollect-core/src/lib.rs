// Public modules
pub mod error;
pub mod facets;
pub mod filtering;
pub mod grouping;
pub mod io;
pub mod models;
pub mod normalize;
pub mod sorting;
pub mod validation;
pub mod view;

// Re-export commonly used types for convenience
pub use error::CoreError;
pub use facets::{available_categories, available_types};
pub use filtering::{apply_filters, has_filters, matches_filters, parse_selection};
pub use grouping::{get_group_names, group_by_sultan, group_items, UNKNOWN_SULTAN};
pub use io::{load_collection, parse_collection, save_collection};
pub use models::{
    Banknote, CatalogEntry, CategoryGroup, CollectionFile, CollectionItem, Facet, FilterState,
    FilterUpdate, MarketplaceItem, SultanGroup, SultanOrderMap,
};
pub use normalize::{get_banknote, normalize_type, slugify, BanknoteLike, CANONICAL_TYPES};
pub use sorting::{compare_by_rules, parse_sort_rules, sort_items, SortRule};
pub use validation::validate_collection;
pub use view::{filters_changed, CollectionView};
