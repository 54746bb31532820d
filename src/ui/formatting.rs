use ottocollect_core::{get_banknote, BanknoteLike, Facet, FilterState};

/// Format one entry as a Markdown list line
pub fn format_entry<T: BanknoteLike>(item: &T) -> String {
    let Some(banknote) = get_banknote(item) else {
        return "- _(no banknote attached)_".to_string();
    };

    let heading = match banknote.pick_key() {
        "" => banknote.id.as_str(),
        pick => pick,
    };

    let details: Vec<&str> = [
        banknote.denomination.as_deref(),
        banknote.note_type.as_deref(),
        banknote.sultan_name.as_deref(),
        banknote.country.as_deref(),
        banknote.year.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    let mut line = format!("- **{}**", heading);
    if !details.is_empty() {
        line.push(' ');
        line.push_str(&details.join(" · "));
    }
    if let Some(price) = item.sale_price() {
        line.push_str(&format!(" _(asking {:.2})_", price));
    }
    line
}

/// Format facets into Markdown list lines with counts
pub fn format_facets(facets: &[Facet]) -> String {
    facets
        .iter()
        .map(|f| format!("- {} (`{}`): {}", f.name, f.id, f.count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Describe the active filter criteria, one Markdown line each
pub fn format_active_filters(filters: &FilterState) -> Vec<String> {
    let mut lines = Vec::new();

    if !filters.search.is_empty() {
        lines.push(format!("- **Search:** {}", filters.search));
    }
    if !filters.categories.is_empty() {
        lines.push(format!("- **Category:** {}", filters.categories.join(" OR ")));
    }
    if !filters.types.is_empty() {
        lines.push(format!("- **Type:** {}", filters.types.join(" OR ")));
    }
    if !filters.countries.is_empty() {
        lines.push(format!("- **Country:** {}", filters.countries.join(" OR ")));
    }
    if !filters.sort.is_empty() {
        let rules: Vec<&str> = filters.sort.iter().map(|r| r.as_str()).collect();
        lines.push(format!("- **Sorted by:** {}", rules.join(", then ")));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ottocollect_core::{Banknote, CatalogEntry, SortRule};
    use serde_json::json;

    #[test]
    fn test_format_entry_with_listing_price() {
        let entry: CatalogEntry = serde_json::from_value(json!({
            "collectionItem": {
                "banknote": {"id": "n1", "extendedPickNumber": "P44", "denomination": "100 Kurush",
                             "type": "Issued note", "country": "Ottoman Empire"},
                "salePrice": 120
            }
        }))
        .unwrap();

        assert_eq!(
            format_entry(&entry),
            "- **P44** 100 Kurush · Issued note · Ottoman Empire _(asking 120.00)_"
        );
    }

    #[test]
    fn test_format_entry_falls_back_to_id() {
        let note = Banknote {
            id: "n9".to_string(),
            ..Default::default()
        };
        assert_eq!(format_entry(&note), "- **n9**");
        assert_eq!(format_entry(&None::<Banknote>), "- _(no banknote attached)_");
    }

    #[test]
    fn test_format_active_filters() {
        let filters = FilterState {
            search: "kaime".to_string(),
            types: vec!["specimens".to_string(), "trial note".to_string()],
            sort: vec![SortRule::Sultan, SortRule::ExtPick],
            ..Default::default()
        };

        assert_eq!(
            format_active_filters(&filters),
            vec![
                "- **Search:** kaime".to_string(),
                "- **Type:** specimens OR trial note".to_string(),
                "- **Sorted by:** sultan, then extPick".to_string(),
            ]
        );
    }
}
