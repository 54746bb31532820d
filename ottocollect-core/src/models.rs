use crate::sorting::SortRule;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sultan name → display rank. Lower ranks come first.
pub type SultanOrderMap = HashMap<String, i64>;

/// Scalar readers for fields that exports carry as either strings or numbers
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Numbers and booleans become their text; other shapes read as absent
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text(deserializer).map(Option::unwrap_or_default)
    }

    /// Numbers, or strings holding a number such as Postgres `numeric` output
    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

/// Canonical catalog record for a physical note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banknote {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(
        alias = "catalog_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub catalog_id: Option<String>,
    #[serde(
        alias = "extended_pick_number",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub extended_pick_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub denomination: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub series: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note_type: Option<String>,
    #[serde(
        alias = "sultan_name",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sultan_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        alias = "created_at",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Banknote {
    /// Every top-level string value of the record, named fields first,
    /// then string values carried in `extra`
    pub fn string_fields(&self) -> impl Iterator<Item = &str> {
        let named = [
            Some(self.id.as_str()),
            self.catalog_id.as_deref(),
            self.extended_pick_number.as_deref(),
            self.country.as_deref(),
            self.denomination.as_deref(),
            self.year.as_deref(),
            self.series.as_deref(),
            self.note_type.as_deref(),
            self.sultan_name.as_deref(),
            self.description.as_deref(),
            self.created_at.as_deref(),
        ];

        named
            .into_iter()
            .flatten()
            .chain(self.extra.values().filter_map(|v| v.as_str()))
    }

    /// Pick number used for ordering, falling back to the catalog id
    pub fn pick_key(&self) -> &str {
        self.extended_pick_number
            .as_deref()
            .or(self.catalog_id.as_deref())
            .unwrap_or_default()
    }
}

/// A user's holding of a banknote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub banknote: Option<Banknote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(
        alias = "purchase_price",
        default,
        deserialize_with = "lenient::amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_price: Option<f64>,
    #[serde(alias = "purchase_date", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(
        alias = "sale_price",
        default,
        deserialize_with = "lenient::amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<f64>,
    #[serde(alias = "is_for_sale", default)]
    pub is_for_sale: bool,
    #[serde(alias = "public_note", skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A marketplace listing offering a collection item for sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(alias = "collection_item")]
    pub collection_item: CollectionItem,
    #[serde(alias = "seller_id", skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Any item shape a catalog file may contain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Marketplace(MarketplaceItem),
    Collection(CollectionItem),
    Banknote(Banknote),
}

impl<'de> Deserialize<'de> for CatalogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        let (is_listing, is_holding) = match value.as_object() {
            Some(map) => (
                map.contains_key("collectionItem") || map.contains_key("collection_item"),
                map.contains_key("banknote"),
            ),
            None => {
                return Err(de::Error::custom(format!(
                    "catalog entry must be an object, found {}",
                    value
                )))
            }
        };

        let entry = if is_listing {
            serde_json::from_value(value).map(CatalogEntry::Marketplace)
        } else if is_holding {
            serde_json::from_value(value).map(CatalogEntry::Collection)
        } else {
            serde_json::from_value(value).map(CatalogEntry::Banknote)
        };

        entry.map_err(de::Error::custom)
    }
}

/// User filter and sort selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub categories: Vec<String>,
    pub types: Vec<String>,
    pub countries: Vec<String>,
    pub sort: Vec<SortRule>,
}

/// Partial filter change; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub categories: Option<Vec<String>>,
    pub types: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    pub sort: Option<Vec<SortRule>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup<T> {
    pub category: String,
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sultan_groups: Option<Vec<SultanGroup<T>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SultanGroup<T> {
    pub sultan: String,
    pub items: Vec<T>,
}

/// Candidate value of a filter control with its item count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// On-disk catalog: entries plus catalog-level display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<CatalogEntry>,
    #[serde(alias = "sultan_order", skip_serializing_if = "Option::is_none")]
    pub sultan_order: Option<SultanOrderMap>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
