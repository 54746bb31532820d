use crate::models::{Banknote, CatalogEntry, CollectionItem, MarketplaceItem};
use regex::Regex;
use std::sync::OnceLock;

/// Fallback type label for banknotes that carry none
pub const DEFAULT_TYPE: &str = "issued note";

/// Canonical type labels offered by the type filter, in display order
pub const CANONICAL_TYPES: [&str; 9] = [
    "Issued note",
    "Specimen",
    "Cancelled",
    "Trial note",
    "Error banknote",
    "Counterfeit banknote",
    "Emergency note",
    "Check & Bond notes",
    "Other notes",
];

/// Substring markers and the canonical label they map to, highest priority first
const TYPE_RULES: [(&[&str], &str); 8] = [
    (&["issued", "issue"], "issued notes"),
    (&["specimen"], "specimens"),
    (&["cancelled", "annule"], "cancelled & annule"),
    (&["trial"], "trial note"),
    (&["error"], "error banknote"),
    (&["counterfeit"], "counterfeit banknote"),
    (&["emergency"], "emergency note"),
    (&["check", "bond"], "check & bond notes"),
];

/// Adapter over every item shape the engine accepts
///
/// Wrappers expose the banknote they hold; a bare banknote exposes itself.
/// `None` means the item has nothing to filter or group on.
pub trait BanknoteLike {
    fn banknote(&self) -> Option<&Banknote>;

    /// Item-level creation timestamp used by the date sort rules
    fn created_at(&self) -> Option<&str> {
        self.banknote().and_then(|b| b.created_at.as_deref())
    }

    /// Asking price, only known for marketplace listings
    fn sale_price(&self) -> Option<f64> {
        None
    }
}

impl BanknoteLike for Banknote {
    fn banknote(&self) -> Option<&Banknote> {
        Some(self)
    }
}

impl BanknoteLike for CollectionItem {
    fn banknote(&self) -> Option<&Banknote> {
        self.banknote.as_ref()
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl BanknoteLike for MarketplaceItem {
    fn banknote(&self) -> Option<&Banknote> {
        self.collection_item.banknote.as_ref()
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .or(self.collection_item.created_at.as_deref())
    }

    fn sale_price(&self) -> Option<f64> {
        self.collection_item.sale_price
    }
}

impl BanknoteLike for CatalogEntry {
    fn banknote(&self) -> Option<&Banknote> {
        match self {
            CatalogEntry::Marketplace(item) => item.banknote(),
            CatalogEntry::Collection(item) => item.banknote(),
            CatalogEntry::Banknote(note) => note.banknote(),
        }
    }

    fn created_at(&self) -> Option<&str> {
        match self {
            CatalogEntry::Marketplace(item) => item.created_at(),
            CatalogEntry::Collection(item) => BanknoteLike::created_at(item),
            CatalogEntry::Banknote(note) => note.created_at(),
        }
    }

    fn sale_price(&self) -> Option<f64> {
        match self {
            CatalogEntry::Marketplace(item) => item.sale_price(),
            _ => None,
        }
    }
}

impl<T: BanknoteLike> BanknoteLike for Option<T> {
    fn banknote(&self) -> Option<&Banknote> {
        self.as_ref().and_then(|item| item.banknote())
    }

    fn created_at(&self) -> Option<&str> {
        self.as_ref().and_then(|item| item.created_at())
    }

    fn sale_price(&self) -> Option<f64> {
        self.as_ref().and_then(|item| item.sale_price())
    }
}

impl<T: BanknoteLike + ?Sized> BanknoteLike for &T {
    fn banknote(&self) -> Option<&Banknote> {
        (**self).banknote()
    }

    fn created_at(&self) -> Option<&str> {
        (**self).created_at()
    }

    fn sale_price(&self) -> Option<f64> {
        (**self).sale_price()
    }
}

/// Resolve the banknote an item refers to
pub fn get_banknote<T: BanknoteLike + ?Sized>(item: &T) -> Option<&Banknote> {
    item.banknote()
}

/// Map a free-text type label onto its canonical lowercase form
pub fn normalize_type(raw: &str) -> String {
    let lower = raw.to_lowercase();

    TYPE_RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lower)
}

/// Lowercase a display name and join its words with hyphens
pub fn slugify(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
    re.replace_all(&name.to_lowercase(), "-").into_owned()
}
