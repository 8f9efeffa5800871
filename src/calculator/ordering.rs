//! Execution and display ordering of entries.

use crate::models::{Direction, Entry, SortOrder};

/// Entries in the order they are expected to fill, favorable price first:
/// ascending for shorts, descending for longs. Ties keep input order.
pub fn execution_order(entries: &[Entry], direction: Direction) -> Vec<Entry> {
    let mut ordered = entries.to_vec();
    match direction {
        Direction::Short => ordered.sort_by(|a, b| a.price.cmp(&b.price)),
        Direction::Long => ordered.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    ordered
}

/// Entries in the user-selected display order.
pub fn display_order(entries: &[Entry], sort_order: SortOrder) -> Vec<Entry> {
    let mut ordered = entries.to_vec();
    match sort_order {
        SortOrder::Original => ordered.sort_by_key(|e| e.original_index),
        SortOrder::Asc => ordered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::Desc => ordered.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    ordered
}
