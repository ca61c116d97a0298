use std::collections::HashSet;

use crate::{EntityId, FilterState};

/// Filter used by the background poll: first page in the default ordering.
pub fn poll_filter() -> FilterState {
    FilterState::default()
}

/// Number of polled ids that are not among the ids currently shown.
pub fn count_new_items(shown: &[EntityId], polled: &[EntityId]) -> usize {
    let shown: HashSet<EntityId> = shown.iter().copied().collect();
    let polled: HashSet<EntityId> = polled.iter().copied().collect();
    polled.difference(&shown).count()
}
