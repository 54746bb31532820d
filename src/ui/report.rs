use std::fmt::Write;

use ottocollect_core::{has_filters, BanknoteLike, CategoryGroup, CollectionView};

use super::formatting::{format_active_filters, format_entry, format_facets};

/// What the report shows besides the matching items
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// List items in sort order instead of grouping by category
    pub flat: bool,
    /// Append the category and type facets
    pub facets: bool,
}

/// Render the current view as a Markdown report
pub fn render_report<T: BanknoteLike + Clone>(
    heading: &str,
    view: &CollectionView<T>,
    options: ReportOptions,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let filters = view.filters();

    writeln!(out, "# {}\n", heading)?;

    let active = format_active_filters(filters);
    if !active.is_empty() {
        let title = if has_filters(filters) { "Active Filters" } else { "Ordering" };
        writeln!(out, "## {}\n", title)?;
        for line in active {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
    }

    let matched = view.filtered_items();
    writeln!(
        out,
        "**Matching Items:** {} of {}\n",
        matched.len(),
        view.items().len()
    )?;

    if matched.is_empty() {
        writeln!(out, "_No items match the specified filters._\n")?;
    } else if options.flat {
        for item in matched {
            writeln!(out, "{}", format_entry(item))?;
        }
        writeln!(out)?;
    } else {
        write_groups(&mut out, view.grouped_items())?;

        let grouped: usize = view.grouped_items().iter().map(|g| g.items.len()).sum();
        if grouped < matched.len() {
            writeln!(
                out,
                "_{} matching entries have no series and are not listed by category._\n",
                matched.len() - grouped
            )?;
        }
    }

    if options.facets {
        writeln!(out, "## Available Categories\n")?;
        writeln!(out, "{}\n", format_facets(view.available_categories()))?;
        writeln!(out, "## Available Types\n")?;
        writeln!(out, "{}\n", format_facets(view.available_types()))?;
    }

    Ok(out)
}

fn write_groups<T: BanknoteLike>(
    out: &mut String,
    groups: &[CategoryGroup<T>],
) -> Result<(), std::fmt::Error> {
    for group in groups {
        writeln!(out, "## {} ({})\n", group.category, group.items.len())?;

        match &group.sultan_groups {
            Some(sultan_groups) => {
                for sultan_group in sultan_groups {
                    writeln!(out, "### {}\n", sultan_group.sultan)?;
                    for item in &sultan_group.items {
                        writeln!(out, "{}", format_entry(item))?;
                    }
                    writeln!(out)?;
                }
            }
            None => {
                for item in &group.items {
                    writeln!(out, "{}", format_entry(item))?;
                }
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
