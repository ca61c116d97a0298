use std::collections::BTreeSet;

use crate::{EntityId, ResultPage};

/// Ids picked for a bulk action. Always a subset of the visible page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` if it is visible on `page`. Returns whether
    /// anything changed.
    pub fn toggle(&mut self, id: EntityId, page: &ResultPage) -> bool {
        if self.ids.remove(&id) {
            return true;
        }
        if page.contains(id) {
            self.ids.insert(id);
            return true;
        }
        false
    }

    pub fn select_all(&mut self, page: &ResultPage) {
        self.ids = page.entities.iter().map(|ad| ad.id).collect();
    }

    /// Selects every visible entity, or clears when all of them are already selected.
    pub fn toggle_all(&mut self, page: &ResultPage) {
        if self.is_all_selected(page) {
            self.clear();
        } else {
            self.select_all(page);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that are not on `page`.
    pub fn retain_visible(&mut self, page: &ResultPage) {
        self.ids.retain(|id| page.contains(*id));
    }

    pub fn is_all_selected(&self, page: &ResultPage) -> bool {
        !page.is_empty() && self.ids.len() == page.entities.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.ids.iter().copied().collect()
    }
}
