use crate::{AdStatus, BulkReport, EntityId, FilterState, Priority};

/// Read-only snapshot handed to whatever renders the list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListViewModel {
    pub filter: FilterState,
    /// Canonical query string for `filter`; empty when everything is default.
    pub query: String,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    pub loading: bool,
    pub error: Option<String>,
    pub new_items_count: usize,
    pub selected: Vec<EntityId>,
    pub all_selected: bool,
    pub bulk_in_progress: bool,
    pub last_bulk: Option<BulkReport>,
}

impl ListViewModel {
    pub fn row_ids(&self) -> Vec<EntityId> {
        self.rows.iter().map(|row| row.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: EntityId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub status: AdStatus,
    pub priority: Priority,
    pub created_at: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
}
