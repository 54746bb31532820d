use crate::error::CoreError;
use crate::normalize::BanknoteLike;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// A single comparator key. Rules are applied in order, the first
/// non-equal comparison decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortRule {
    Sultan,
    FaceValue,
    ExtPick,
    Newest,
    Oldest,
    PriceHighToLow,
    PriceLowToHigh,
    Country,
}

impl SortRule {
    pub const ALL: [SortRule; 8] = [
        SortRule::Sultan,
        SortRule::FaceValue,
        SortRule::ExtPick,
        SortRule::Newest,
        SortRule::Oldest,
        SortRule::PriceHighToLow,
        SortRule::PriceLowToHigh,
        SortRule::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortRule::Sultan => "sultan",
            SortRule::FaceValue => "faceValue",
            SortRule::ExtPick => "extPick",
            SortRule::Newest => "newest",
            SortRule::Oldest => "oldest",
            SortRule::PriceHighToLow => "priceHighToLow",
            SortRule::PriceLowToHigh => "priceLowToHigh",
            SortRule::Country => "country",
        }
    }
}

impl fmt::Display for SortRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortRule::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownSortRule(s.to_string()))
    }
}

/// Parse rule identifiers, rejecting the first unknown one
pub fn parse_sort_rules<S: AsRef<str>>(identifiers: &[S]) -> Result<Vec<SortRule>, CoreError> {
    identifiers.iter().map(|s| s.as_ref().parse()).collect()
}

/// Stable sort by the given rules; ties keep their input order
pub fn sort_items<T: BanknoteLike>(items: &mut [T], rules: &[SortRule]) {
    if rules.is_empty() {
        return;
    }
    items.sort_by(|a, b| compare_by_rules(a, b, rules));
}

/// Compare two items rule by rule, falling through on ties
pub fn compare_by_rules<T: BanknoteLike>(a: &T, b: &T, rules: &[SortRule]) -> Ordering {
    rules
        .iter()
        .map(|rule| compare_by_rule(a, b, *rule))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

pub fn compare_by_rule<T: BanknoteLike>(a: &T, b: &T, rule: SortRule) -> Ordering {
    match rule {
        SortRule::Newest => timestamp_millis(b.created_at()).cmp(&timestamp_millis(a.created_at())),
        SortRule::Oldest => timestamp_millis(a.created_at()).cmp(&timestamp_millis(b.created_at())),
        SortRule::PriceHighToLow => compare_f64(price_of(b), price_of(a)),
        SortRule::PriceLowToHigh => compare_f64(price_of(a), price_of(b)),
        banknote_rule => match (a.banknote(), b.banknote()) {
            (Some(x), Some(y)) => match banknote_rule {
                SortRule::Sultan => collate(
                    x.sultan_name.as_deref().unwrap_or_default(),
                    y.sultan_name.as_deref().unwrap_or_default(),
                ),
                SortRule::FaceValue => compare_denominations(
                    x.denomination.as_deref().unwrap_or_default(),
                    y.denomination.as_deref().unwrap_or_default(),
                ),
                SortRule::ExtPick => collate(x.pick_key(), y.pick_key()),
                SortRule::Country => collate(
                    x.country.as_deref().unwrap_or_default(),
                    y.country.as_deref().unwrap_or_default(),
                ),
                _ => Ordering::Equal,
            },
            _ => Ordering::Equal,
        },
    }
}

/// Kurush first, lira last, other units between; by amount within a rank
pub fn compare_denominations(a: &str, b: &str) -> Ordering {
    let (a_rank, a_value) = denomination_key(a);
    let (b_rank, b_value) = denomination_key(b);

    a_rank
        .cmp(&b_rank)
        .then_with(|| a_value.total_cmp(&b_value))
}

/// Unit rank (kurush, any other unit, lira) and numeric amount
pub fn denomination_key(denomination: &str) -> (u8, f64) {
    let lower = denomination.to_lowercase();
    let rank = if lower.contains("kurush") {
        0
    } else if lower.contains("lira") {
        2
    } else {
        1
    };
    (rank, denomination_value(denomination))
}

/// Numeric part of a denomination string, 0 when none can be read
pub fn denomination_value(denomination: &str) -> f64 {
    static NON_NUMERIC: OnceLock<Regex> = OnceLock::new();
    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();

    let non_numeric = NON_NUMERIC.get_or_init(|| Regex::new(r"[^\d.]").expect("valid pattern"));
    let leading =
        LEADING_NUMBER.get_or_init(|| Regex::new(r"^(\d+\.?\d*|\.\d+)").expect("valid pattern"));

    let digits = non_numeric.replace_all(denomination, "");
    leading
        .find(&digits)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Milliseconds since the epoch; missing or unreadable dates count as 0
pub fn timestamp_millis(raw: Option<&str>) -> i64 {
    raw.and_then(parse_timestamp).unwrap_or(0)
}

/// Accepts RFC 3339, Postgres-style `YYYY-MM-DD HH:MM:SS[.f]` and bare dates
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Locale-style string comparison: accent-decomposed, case-folded,
/// whitespace-collapsed keys first, raw text on ties
pub fn collate(a: &str, b: &str) -> Ordering {
    normalize_for_sorting(a)
        .cmp(&normalize_for_sorting(b))
        .then_with(|| a.cmp(b))
}

/// NFD-decompose, lowercase and collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let normalized: String = s.nfd().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn price_of<T: BanknoteLike>(item: &T) -> f64 {
    item.sale_price().unwrap_or(0.0)
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Banknote, CollectionItem, MarketplaceItem};

    fn note(id: &str) -> Banknote {
        Banknote {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn ids(items: &[Banknote]) -> Vec<&str> {
        items.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_parse_sort_rules() {
        let rules = parse_sort_rules(&["sultan", "faceValue", "extPick"]).unwrap();
        assert_eq!(rules, vec![SortRule::Sultan, SortRule::FaceValue, SortRule::ExtPick]);

        let err = parse_sort_rules(&["extPick", "extpick"]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownSortRule(ref s) if s == "extpick"));
    }

    #[test]
    fn test_sort_rule_display_round_trips_through_from_str() {
        for rule in SortRule::ALL {
            assert_eq!(rule.to_string().parse::<SortRule>().unwrap(), rule);
        }
    }

    #[test]
    fn test_kurush_sorts_before_lira() {
        let mut items = vec![
            Banknote {
                denomination: Some("5 Lira".to_string()),
                ..note("lira")
            },
            Banknote {
                denomination: Some("100 Kurush".to_string()),
                ..note("kurush")
            },
        ];

        sort_items(&mut items, &[SortRule::FaceValue]);
        assert_eq!(ids(&items), vec!["kurush", "lira"]);
    }

    #[test]
    fn test_face_value_numeric_within_unit() {
        let mut items: Vec<Banknote> = ["1000 Lira", "50 Lira", "1/2 Lira", "unknown"]
            .iter()
            .map(|d| Banknote {
                denomination: Some(d.to_string()),
                ..note(d)
            })
            .collect();

        sort_items(&mut items, &[SortRule::FaceValue]);
        // "1/2" strips to "12"; "unknown" reads as 0
        assert_eq!(ids(&items), vec!["unknown", "1/2 Lira", "50 Lira", "1000 Lira"]);
    }

    #[test]
    fn test_face_value_sort_mixed_units_is_total() {
        let units = ["Kurush", "Lira", "Piastres", "Para", ""];
        let mut seed: u64 = 42;
        let mut items: Vec<Banknote> = (0..400)
            .map(|i| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let value = (seed >> 33) % 1000;
                let unit = units[(seed >> 20) as usize % units.len()];
                Banknote {
                    denomination: Some(format!("{} {}", value, unit).trim().to_string()),
                    ..note(&i.to_string())
                }
            })
            .collect();

        sort_items(&mut items, &[SortRule::FaceValue]);

        let keys: Vec<(u8, f64)> = items
            .iter()
            .map(|b| denomination_key(b.denomination.as_deref().unwrap_or_default()))
            .collect();
        for pair in keys.windows(2) {
            assert_ne!(
                pair[0].0.cmp(&pair[1].0).then(pair[0].1.total_cmp(&pair[1].1)),
                Ordering::Greater,
                "{:?} sorted before {:?}",
                pair[0],
                pair[1]
            );
        }

        let first_lira = keys.iter().position(|k| k.0 == 2).unwrap_or(keys.len());
        assert!(keys[first_lira..].iter().all(|k| k.0 != 0));
    }

    #[test]
    fn test_other_units_sit_between_kurush_and_lira() {
        assert_eq!(compare_denominations("10 Para", "100 Kurush"), Ordering::Greater);
        assert_eq!(compare_denominations("100 Kurush", "5 Lira"), Ordering::Less);
        assert_eq!(compare_denominations("10 Para", "5 Lira"), Ordering::Less);
    }

    #[test]
    fn test_denomination_value() {
        assert_eq!(denomination_value("2.5 Kurush"), 2.5);
        assert_eq!(denomination_value("Lira"), 0.0);
        assert_eq!(denomination_value("1.5.2 Lira"), 1.5);
    }

    #[test]
    fn test_ext_pick_sort_is_stable() {
        let mut items = vec![
            Banknote {
                extended_pick_number: Some("P2".to_string()),
                ..note("first")
            },
            Banknote {
                extended_pick_number: Some("P1".to_string()),
                ..note("pick-one")
            },
            Banknote {
                extended_pick_number: Some("P2".to_string()),
                ..note("second")
            },
        ];

        sort_items(&mut items, &[SortRule::ExtPick]);
        assert_eq!(ids(&items), vec!["pick-one", "first", "second"]);
    }

    #[test]
    fn test_ext_pick_falls_back_to_catalog_id() {
        let mut items = vec![
            Banknote {
                extended_pick_number: Some("P9".to_string()),
                ..note("ext")
            },
            Banknote {
                catalog_id: Some("P3".to_string()),
                ..note("catalog")
            },
        ];

        sort_items(&mut items, &[SortRule::ExtPick]);
        assert_eq!(ids(&items), vec!["catalog", "ext"]);
    }

    #[test]
    fn test_secondary_rule_breaks_ties() {
        let mut items = vec![
            Banknote {
                sultan_name: Some("Mehmed V".to_string()),
                extended_pick_number: Some("P20".to_string()),
                ..note("a")
            },
            Banknote {
                sultan_name: Some("Abdulmecid".to_string()),
                extended_pick_number: Some("P30".to_string()),
                ..note("b")
            },
            Banknote {
                sultan_name: Some("Mehmed V".to_string()),
                extended_pick_number: Some("P10".to_string()),
                ..note("c")
            },
        ];

        sort_items(&mut items, &[SortRule::Sultan, SortRule::ExtPick]);
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_newest_and_oldest_with_missing_dates() {
        let dated = |id: &str, date: Option<&str>| CollectionItem {
            id: id.to_string(),
            banknote: Some(note(id)),
            created_at: date.map(str::to_string),
            ..Default::default()
        };
        let mut items = vec![
            dated("mid", Some("2023-06-01T00:00:00Z")),
            dated("none", None),
            dated("late", Some("2024-01-15 08:30:00+00")),
            dated("early", Some("2021-03-02")),
        ];

        sort_items(&mut items, &[SortRule::Newest]);
        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["late", "mid", "early", "none"]);

        sort_items(&mut items, &[SortRule::Oldest]);
        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["none", "early", "mid", "late"]);
    }

    #[test]
    fn test_price_rules_use_listing_price() {
        let listing = |id: &str, price: f64| MarketplaceItem {
            id: id.to_string(),
            collection_item: CollectionItem {
                banknote: Some(note(id)),
                sale_price: Some(price),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut items = vec![listing("mid", 50.0), listing("low", 5.0), listing("high", 500.0)];

        sort_items(&mut items, &[SortRule::PriceHighToLow]);
        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);

        sort_items(&mut items, &[SortRule::PriceLowToHigh]);
        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["low", "mid", "high"]);
    }

    #[test]
    fn test_collate_ignores_case_and_accents_first() {
        assert_eq!(collate("abdulmecid", "Abdulaziz"), Ordering::Greater);
        assert_eq!(collate("Ölçü", "Pasha"), Ordering::Less);
        assert_eq!(collate("Turkey", "turkey"), Ordering::Less);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T08:30:00.123Z").is_some());
        assert!(parse_timestamp("2024-01-15 08:30:00.123456+00:00").is_some());
        assert!(parse_timestamp("2024-01-15T08:30:00").is_some());
        assert_eq!(parse_timestamp("1970-01-01"), Some(0));
        assert!(parse_timestamp("yesterday").is_none());
    }
}
