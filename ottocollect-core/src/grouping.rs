use crate::models::{CategoryGroup, SultanGroup, SultanOrderMap};
use crate::normalize::{get_banknote, BanknoteLike};
use crate::sorting::{collate, sort_items, SortRule};
use std::collections::HashMap;

/// Sultan label for notes without an attributed ruler
pub const UNKNOWN_SULTAN: &str = "Unknown";

/// Group items by category (`series`), sorting each category by `rules`
///
/// Pass items in upstream order: categories keep the order in which they
/// are first seen there, so the item sort never reorders categories.
/// Items without a series are left out. Sultan sub-groups are built when
/// `rules` sorts by sultan.
pub fn group_items<T: BanknoteLike + Clone>(
    items: &[T],
    rules: &[SortRule],
    sultan_order: Option<&SultanOrderMap>,
) -> Vec<CategoryGroup<T>> {
    let by_sultan = rules.contains(&SortRule::Sultan);

    bucket_in_order(items, |item| {
        get_banknote(item)
            .and_then(|b| b.series.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
    .into_iter()
    .map(|(category, mut members)| {
        sort_items(&mut members, rules);
        let sultan_groups = by_sultan.then(|| group_by_sultan(&members, sultan_order));
        CategoryGroup {
            category,
            items: members,
            sultan_groups,
        }
    })
    .collect()
}

/// Partition items by sultan name and order the partitions
///
/// With an order map, ranked sultans come first by rank and unranked ones
/// follow alphabetically; without one, all are alphabetical.
pub fn group_by_sultan<T: BanknoteLike + Clone>(
    items: &[T],
    sultan_order: Option<&SultanOrderMap>,
) -> Vec<SultanGroup<T>> {
    let mut groups: Vec<SultanGroup<T>> = bucket_in_order(items, |item| {
        let name = get_banknote(item)
            .and_then(|b| b.sultan_name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SULTAN);
        Some(name.to_string())
    })
    .into_iter()
    .map(|(sultan, items)| SultanGroup { sultan, items })
    .collect();

    match sultan_order {
        Some(order) => groups.sort_by(|a, b| {
            let rank_a = order.get(&a.sultan).copied().unwrap_or(i64::MAX);
            let rank_b = order.get(&b.sultan).copied().unwrap_or(i64::MAX);
            rank_a.cmp(&rank_b).then_with(|| collate(&a.sultan, &b.sultan))
        }),
        None => groups.sort_by(|a, b| collate(&a.sultan, &b.sultan)),
    }

    groups
}

/// Get category names of grouped items, in display order
pub fn get_group_names<T>(groups: &[CategoryGroup<T>]) -> Vec<String> {
    groups.iter().map(|g| g.category.clone()).collect()
}

/// Bucket items by key, keeping buckets in first-seen order and items in
/// input order. Items with no key are skipped.
fn bucket_in_order<T, F>(items: &[T], key_of: F) -> Vec<(String, Vec<T>)>
where
    T: Clone,
    F: Fn(&T) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<T>)> = Vec::new();

    for item in items {
        let Some(key) = key_of(item) else {
            continue;
        };

        match index.get(&key) {
            Some(&pos) => buckets[pos].1.push(item.clone()),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![item.clone()]));
            }
        }
    }

    buckets
}
