//! Derived views over store state.
//!
//! Everything here is a pure function of the items it is given:
//! totals, per-person splits, filtered/sorted projections and the
//! plain-text summary. Nothing mutates the underlying list.

use crate::models::{Item, List};

/// Presentation sort order for item projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Insertion order, untouched.
    #[default]
    None,
    /// Case-insensitive lexicographic by name.
    Name,
    /// Ascending by price.
    Price,
}

/// Sum of all item prices.
pub fn total(items: &[Item]) -> f64 {
    items.iter().map(|i| i.price).sum()
}

/// Fixed-point currency display with two fractional digits.
pub fn format_price(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Per-person share of a total, `None` when the headcount is not a
/// positive integer (the UI shows it as unavailable).
pub fn per_person(total: f64, people: i64) -> Option<String> {
    if people < 1 {
        return None;
    }
    Some(format_price(total / people as f64))
}

/// Filtered, sorted projection of the items.
///
/// The query matches case-insensitively against name or category
/// substrings; an empty query matches everything. The input slice is
/// never reordered, only the returned copy.
pub fn filter_and_sort(items: &[Item], query: &str, sort: SortMode) -> Vec<Item> {
    let needle = query.trim().to_lowercase();
    let mut projected: Vec<Item> = items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match sort {
        SortMode::None => {}
        SortMode::Name => {
            projected.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortMode::Price => projected.sort_by(|a, b| a.price.total_cmp(&b.price)),
    }

    projected
}

/// Deterministic multi-line rendering of one list.
///
/// Header with the list name, one line per item (category segment
/// omitted when empty), a blank line and the total. An empty list gets
/// an explicit "(no items)" line instead of the item block.
pub fn summary_text(list: &List) -> String {
    let mut out = String::new();
    out.push_str(&list.name);
    out.push('\n');

    if list.items.is_empty() {
        out.push_str("(no items)\n");
    } else {
        for item in &list.items {
            if item.category.is_empty() {
                out.push_str(&format!("- {}: {}\n", item.name, format_price(item.price)));
            } else {
                out.push_str(&format!(
                    "- {} ({}): {}\n",
                    item.name,
                    item.category,
                    format_price(item.price)
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&format!("Total: {}\n", format_price(total(&list.items))));
    out
}
