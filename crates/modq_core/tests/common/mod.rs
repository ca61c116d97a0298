#![allow(dead_code)]

use std::sync::Once;

use modq_core::{
    update, AdStatus, Advertisement, Effect, EntityId, ListState, Msg, Priority, RequestId,
    ResultPage, PAGE_SIZE,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(modq_logging::initialize_for_tests);
}

pub fn ad(id: EntityId) -> Advertisement {
    Advertisement {
        id,
        title: format!("Ad #{id}"),
        description: String::new(),
        price: 1000.0 + id as f64,
        category: "Электроника".to_string(),
        category_id: Some(0),
        status: AdStatus::Pending,
        priority: Priority::Normal,
        created_at: "2026-10-01T10:00:00Z".to_string(),
        updated_at: "2026-10-01T10:00:00Z".to_string(),
        images: Vec::new(),
    }
}

pub fn page_of(ids: &[EntityId]) -> ResultPage {
    ResultPage {
        entities: ids.iter().copied().map(ad).collect(),
        current_page: 1,
        total_pages: 1,
        total_items: ids.len() as u64,
        page_size: PAGE_SIZE,
    }
}

pub fn fetch_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchList { request, .. } => Some(*request),
            _ => None,
        })
        .expect("fetch effect")
}

/// Mounts with `query` and resolves the initial fetch with `ids`.
pub fn mounted_with(query: &str, ids: &[EntityId]) -> ListState {
    let (state, effects) = update(
        ListState::new(),
        Msg::Mounted {
            query: query.to_string(),
        },
    );
    let request = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::ListLoaded {
            request,
            result: Ok(page_of(ids)),
        },
    );
    state
}
