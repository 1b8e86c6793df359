//! Action item consolidation: drop near-duplicates, then order for display.
//!
//! Two items are duplicates when their normalized descriptions are equal or
//! one contains the other. The first item seen wins. Output is sorted by
//! priority (urgent first), then by due date (earliest first, undated last),
//! with remaining ties kept in input order.

use std::cmp::Ordering;

use crate::types::{ActionItem, Timestamp};
use crate::util::normalize_whitespace;

pub fn consolidate(items: Vec<ActionItem>) -> Vec<ActionItem> {
    let input_len = items.len();
    let mut kept: Vec<(String, ActionItem)> = Vec::with_capacity(input_len);

    for item in items {
        let key = dedup_key(&item.description);
        if kept.iter().any(|(existing, _)| is_duplicate(existing, &key)) {
            continue;
        }
        kept.push((key, item));
    }

    let mut result: Vec<ActionItem> = kept.into_iter().map(|(_, item)| item).collect();
    result.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| compare_due_date(a.due_date, b.due_date))
    });

    if result.len() < input_len {
        log::debug!(
            "consolidate: {} -> {} action items",
            input_len,
            result.len()
        );
    }
    result
}

fn dedup_key(description: &str) -> String {
    normalize_whitespace(&description.trim().to_lowercase())
}

// An empty key is a substring of everything; only another empty key matches it.
fn is_duplicate(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return a == b;
    }
    a == b || a.contains(b) || b.contains(a)
}

/// Earlier dates rank higher. Missing dates rank last.
fn compare_due_date(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    match (a, b) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
