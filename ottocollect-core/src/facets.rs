use crate::models::Facet;
use crate::normalize::{get_banknote, normalize_type, slugify, BanknoteLike, CANONICAL_TYPES};
use std::collections::HashMap;

/// Categories present in the collection, in first-seen order
/// Counts cover the whole collection, not the filtered view.
pub fn available_categories<T: BanknoteLike>(items: &[T]) -> Vec<Facet> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut facets: Vec<Facet> = Vec::new();

    for series in items
        .iter()
        .filter_map(|item| get_banknote(item))
        .filter_map(|b| b.series.as_deref())
        .filter(|s| !s.is_empty())
    {
        let id = slugify(series);
        match index.get(&id) {
            Some(&pos) => facets[pos].count += 1,
            None => {
                index.insert(id.clone(), facets.len());
                facets.push(Facet {
                    id,
                    name: series.to_string(),
                    count: 1,
                });
            }
        }
    }

    facets
}

/// Type facet: the canonical types always, other types when present
pub fn available_types<T: BanknoteLike>(items: &[T]) -> Vec<Facet> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut facets: Vec<(Facet, bool)> = Vec::new();

    for name in CANONICAL_TYPES {
        let id = normalize_type(name);
        index.insert(id.clone(), facets.len());
        facets.push((
            Facet {
                id,
                name: name.to_string(),
                count: 0,
            },
            true,
        ));
    }

    for raw in items.iter().filter_map(|item| get_banknote(item)).map(|b| {
        b.note_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(CANONICAL_TYPES[0])
    }) {
        let id = normalize_type(raw);
        match index.get(&id) {
            Some(&pos) => facets[pos].0.count += 1,
            None => {
                index.insert(id.clone(), facets.len());
                facets.push((
                    Facet {
                        id,
                        name: raw.to_string(),
                        count: 1,
                    },
                    false,
                ));
            }
        }
    }

    facets
        .into_iter()
        .filter(|(facet, canonical)| *canonical || facet.count > 0)
        .map(|(facet, _)| facet)
        .collect()
}
