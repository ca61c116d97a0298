use crate::codec;
use crate::view_model::{ListViewModel, PaginationView, RowView};
use crate::{BulkReport, EntityId, FilterState, ResultPage, SelectionSet};

pub type RequestId = u64;

/// Everything the list view owns between messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    filter: FilterState,
    page: ResultPage,
    has_page: bool,
    loading: bool,
    error: Option<String>,
    new_items_count: usize,
    selection: SelectionSet,
    bulk_in_progress: bool,
    last_bulk: Option<BulkReport>,
    active_request: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> &ResultPage {
        &self.page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn bulk_in_progress(&self) -> bool {
        self.bulk_in_progress
    }

    pub fn active_request(&self) -> Option<RequestId> {
        self.active_request
    }

    pub fn new_items_count(&self) -> usize {
        self.new_items_count
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            filter: self.filter.clone(),
            query: codec::to_query_string(&self.filter),
            rows: self
                .page
                .entities
                .iter()
                .map(|ad| RowView {
                    id: ad.id,
                    title: ad.title.clone(),
                    price: ad.price,
                    category: ad.category.clone(),
                    status: ad.status,
                    priority: ad.priority,
                    created_at: ad.created_at.clone(),
                    selected: self.selection.contains(ad.id),
                })
                .collect(),
            pagination: PaginationView {
                current_page: self.page.current_page,
                total_pages: self.page.total_pages,
                total_items: self.page.total_items,
                page_size: self.page.page_size,
            },
            loading: self.loading,
            error: self.error.clone(),
            new_items_count: self.new_items_count,
            selected: self.selection.ids(),
            all_selected: self.selection.is_all_selected(&self.page),
            bulk_in_progress: self.bulk_in_progress,
            last_bulk: self.last_bulk.clone(),
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub(crate) fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Issues a new request id for the current filter and marks it active.
    pub(crate) fn begin_fetch(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request = self.next_request_id;
        self.active_request = Some(request);
        self.loading = true;
        self.mark_dirty();
        request
    }

    pub(crate) fn is_active(&self, request: RequestId) -> bool {
        self.active_request == Some(request)
    }

    pub(crate) fn apply_page(&mut self, page: ResultPage) {
        self.page = page;
        self.has_page = true;
        self.error = None;
        self.new_items_count = 0;
        self.selection.retain_visible(&self.page);
        self.settle();
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.error = Some(message);
        self.settle();
    }

    pub(crate) fn settle(&mut self) {
        self.active_request = None;
        self.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn shown_ids(&self) -> Option<Vec<EntityId>> {
        (self.has_page && !self.page.is_empty()).then(|| self.page.ids())
    }

    pub(crate) fn raise_new_items(&mut self, count: usize) {
        self.new_items_count = count;
        self.mark_dirty();
    }

    pub(crate) fn selection_mut(&mut self) -> (&mut SelectionSet, &ResultPage) {
        (&mut self.selection, &self.page)
    }

    pub(crate) fn start_bulk(&mut self) {
        self.bulk_in_progress = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_bulk(&mut self, report: BulkReport) {
        self.bulk_in_progress = false;
        self.selection.clear();
        self.last_bulk = Some(report);
        self.mark_dirty();
    }
}
