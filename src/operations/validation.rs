use ottocollect_core::{parse_selection, parse_sort_rules, SortRule, SultanOrderMap};

/// Validation error with field and message
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Flatten repeated and comma-separated flag values into one selection
pub fn collect_selection(values: &[String]) -> Vec<String> {
    values.iter().flat_map(|v| parse_selection(v)).collect()
}

/// Parse sort flags into rules, naming the valid identifiers on failure
pub fn parse_sort_flags(values: &[String]) -> Result<Vec<SortRule>, ValidationError> {
    parse_sort_rules(&collect_selection(values)).map_err(|e| ValidationError {
        field: "sort".to_string(),
        message: format!(
            "{} (expected one of: {})",
            e,
            SortRule::ALL
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

/// Parse `NAME=RANK` entries into a sultan rank table
pub fn parse_sultan_order(entries: &[String]) -> Result<SultanOrderMap, ValidationError> {
    let mut order = SultanOrderMap::new();

    for entry in entries {
        let (name, rank) = entry.split_once('=').ok_or_else(|| ValidationError {
            field: "sultan-order".to_string(),
            message: format!("Invalid entry '{}'. Expected 'name=rank'", entry),
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError {
                field: "sultan-order".to_string(),
                message: format!("Sultan name cannot be empty in '{}'", entry),
            });
        }

        let rank: i64 = rank.trim().parse().map_err(|_| ValidationError {
            field: "sultan-order".to_string(),
            message: format!("Rank for '{}' must be an integer, found '{}'", name, rank.trim()),
        })?;

        order.insert(name.to_string(), rank);
    }

    Ok(order)
}
