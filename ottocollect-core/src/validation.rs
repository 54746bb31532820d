use crate::normalize::{get_banknote, BanknoteLike};
use crate::sorting::{denomination_value, parse_timestamp};

/// Report catalog entries the engine will silently default or hide
/// Returns Ok(()) if clean, or Err(Vec<String>) with one message per problem
pub fn validate_collection<T: BanknoteLike>(items: &[T]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let item_ref = format!("Item #{}", idx + 1);

        if let Some(created) = item.created_at() {
            if parse_timestamp(created).is_none() {
                errors.push(format!(
                    "{}: unreadable timestamp '{}' (sorted as oldest)",
                    item_ref, created
                ));
            }
        }

        let Some(banknote) = get_banknote(item) else {
            errors.push(format!(
                "{}: no banknote attached (excluded from filtered and grouped views)",
                item_ref
            ));
            continue;
        };

        let item_ref = if banknote.id.is_empty() {
            item_ref
        } else {
            format!("{} ('{}')", item_ref, banknote.id)
        };

        if banknote.series.as_deref().map_or(true, str::is_empty) {
            errors.push(format!(
                "{}: no series (hidden from the grouped view)",
                item_ref
            ));
        }

        if let Some(denomination) = banknote.denomination.as_deref() {
            if denomination_value(denomination) == 0.0 {
                errors.push(format!(
                    "{}: denomination '{}' has no numeric value (sorted as 0)",
                    item_ref, denomination
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
