use crate::codec;
use crate::poll::count_new_items;
use crate::{Effect, FilterPatch, FilterState, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { query } => {
            state.set_filter(codec::decode(&query));
            state.selection_mut().0.clear();
            vec![fetch(&mut state)]
        }
        Msg::FilterChanged(patch) => {
            state.filter_mut().apply(patch);
            state.selection_mut().0.clear();
            navigate_and_fetch(&mut state)
        }
        Msg::SortClicked(field) => {
            state.filter_mut().toggle_sort(field);
            state.selection_mut().0.clear();
            navigate_and_fetch(&mut state)
        }
        Msg::PageRequested(page) => {
            state.filter_mut().apply(FilterPatch::default().page(page));
            state.selection_mut().0.clear();
            navigate_and_fetch(&mut state)
        }
        Msg::ResetFilters => {
            state.set_filter(FilterState::default());
            state.selection_mut().0.clear();
            navigate_and_fetch(&mut state)
        }
        Msg::PresetApplied(filter) => {
            state.set_filter(FilterState {
                page: 1,
                ..filter.normalized()
            });
            state.selection_mut().0.clear();
            navigate_and_fetch(&mut state)
        }
        Msg::RefreshRequested => vec![fetch(&mut state)],
        Msg::ListLoaded { request, result } => {
            // Results of superseded requests never reach the page.
            if state.is_active(request) {
                match result {
                    Ok(page) => state.apply_page(page),
                    Err(message) => state.apply_failure(message),
                }
            }
            Vec::new()
        }
        Msg::ListCancelled { request } => {
            if state.is_active(request) {
                state.settle();
            }
            Vec::new()
        }
        Msg::PollCompleted { ids } => {
            if let Some(shown) = state.shown_ids() {
                let count = count_new_items(&shown, &ids);
                if count > 0 && count != state.new_items_count() {
                    state.raise_new_items(count);
                }
            }
            Vec::new()
        }
        Msg::ToggleSelected(id) => {
            let (selection, page) = state.selection_mut();
            if selection.toggle(id, page) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectAll => {
            let (selection, page) = state.selection_mut();
            selection.select_all(page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ToggleAll => {
            let (selection, page) = state.selection_mut();
            selection.toggle_all(page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ClearSelection => {
            if !state.selection().is_empty() {
                state.selection_mut().0.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BulkRequested(action) => {
            if state.bulk_in_progress() || state.selection().is_empty() {
                return (state, Vec::new());
            }
            let ids = state.selection().ids();
            state.start_bulk();
            vec![Effect::RunBulk { action, ids }]
        }
        Msg::BulkFinished(report) => {
            if !state.bulk_in_progress() {
                return (state, Vec::new());
            }
            state.finish_bulk(report);
            vec![fetch(&mut state)]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch(state: &mut ListState) -> Effect {
    let request = state.begin_fetch();
    Effect::FetchList {
        request,
        filter: state.filter().clone(),
    }
}

fn navigate_and_fetch(state: &mut ListState) -> Vec<Effect> {
    let query = codec::to_query_string(state.filter());
    vec![Effect::SyncUrl { query }, fetch(state)]
}
