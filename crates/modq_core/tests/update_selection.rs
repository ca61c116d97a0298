mod common;

use common::{fetch_request, init_logging, mounted_with, page_of};
use modq_core::{update, BulkReport, Effect, FilterPatch, ModerationAction, Msg};
use pretty_assertions::assert_eq;

#[test]
fn toggle_ignores_ids_that_are_not_visible() {
    init_logging();
    let state = mounted_with("", &[1, 2]);
    let (state, _) = update(state, Msg::ToggleSelected(2));
    let (state, _) = update(state, Msg::ToggleSelected(99));
    assert_eq!(state.view().selected, vec![2]);

    let (state, _) = update(state, Msg::ToggleSelected(2));
    assert!(state.selection().is_empty());
}

#[test]
fn toggle_all_selects_then_clears() {
    init_logging();
    let state = mounted_with("", &[1, 2, 3]);
    let (state, _) = update(state, Msg::ToggleAll);
    assert!(state.view().all_selected);

    let (state, _) = update(state, Msg::ToggleAll);
    assert!(state.selection().is_empty());
}

#[test]
fn filter_change_leaves_no_orphaned_selection() {
    init_logging();
    let state = mounted_with("", &[1, 2, 3, 4]);
    let (state, _) = update(state, Msg::SelectAll);
    let (state, effects) = update(
        state,
        Msg::FilterChanged(FilterPatch::default().search("narrow")),
    );
    let (state, _) = update(
        state,
        Msg::ListLoaded {
            request: fetch_request(&effects),
            result: Ok(page_of(&[2, 4])),
        },
    );

    let visible = state.view().row_ids();
    for id in state.view().selected {
        assert!(visible.contains(&id));
    }
}

#[test]
fn refresh_drops_selected_ids_that_left_the_page() {
    init_logging();
    let state = mounted_with("", &[1, 2, 3]);
    let (state, _) = update(state, Msg::SelectAll);
    let (state, effects) = update(state, Msg::RefreshRequested);
    let (state, _) = update(
        state,
        Msg::ListLoaded {
            request: fetch_request(&effects),
            result: Ok(page_of(&[2, 3, 5])),
        },
    );
    assert_eq!(state.view().selected, vec![2, 3]);
}

#[test]
fn page_change_clears_selection() {
    init_logging();
    let state = mounted_with("", &[1, 2]);
    let (state, _) = update(state, Msg::SelectAll);
    let (state, _) = update(state, Msg::PageRequested(2));
    assert!(state.selection().is_empty());
}

#[test]
fn bulk_with_empty_selection_is_noop() {
    init_logging();
    let state = mounted_with("", &[1, 2]);
    let (state, effects) = update(state, Msg::BulkRequested(ModerationAction::Approve));
    assert!(effects.is_empty());
    assert!(!state.bulk_in_progress());
}

#[test]
fn bulk_runs_once_until_finished() {
    init_logging();
    let state = mounted_with("", &[1, 2, 3]);
    let (state, _) = update(state, Msg::ToggleSelected(1));
    let (state, _) = update(state, Msg::ToggleSelected(3));

    let (state, effects) = update(state, Msg::BulkRequested(ModerationAction::bulk_reject()));
    assert_eq!(
        effects,
        vec![Effect::RunBulk {
            action: ModerationAction::bulk_reject(),
            ids: vec![1, 3],
        }]
    );
    assert!(state.bulk_in_progress());

    let (state, effects) = update(state, Msg::BulkRequested(ModerationAction::Approve));
    assert!(effects.is_empty());
    assert!(state.bulk_in_progress());
}

#[test]
fn bulk_finish_clears_selection_and_refreshes_once() {
    init_logging();
    let state = mounted_with("", &[1, 2, 3]);
    let (state, _) = update(state, Msg::SelectAll);
    let (state, _) = update(state, Msg::BulkRequested(ModerationAction::Approve));

    let report = BulkReport {
        succeeded: vec![1, 3],
        failed: vec![(2, "http status 500".to_string())],
    };
    let (state, effects) = update(state, Msg::BulkFinished(report.clone()));

    assert!(state.selection().is_empty());
    assert!(!state.bulk_in_progress());
    assert_eq!(state.view().last_bulk, Some(report));
    assert_eq!(
        effects
            .iter()
            .filter(|effect| matches!(effect, Effect::FetchList { .. }))
            .count(),
        1
    );
    assert_eq!(effects.len(), 1);
}

#[test]
fn stray_bulk_finish_is_ignored() {
    init_logging();
    let state = mounted_with("", &[1]);
    let (state, effects) = update(state, Msg::BulkFinished(BulkReport::default()));
    assert!(effects.is_empty());
    assert_eq!(state.view().last_bulk, None);
}
