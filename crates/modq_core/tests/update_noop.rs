use modq_core::{update, ListState, Msg};

#[test]
fn update_is_noop() {
    let state = ListState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn dirty_flag_is_consumed_once() {
    let (mut state, _) = update(
        ListState::new(),
        Msg::Mounted {
            query: String::new(),
        },
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}
