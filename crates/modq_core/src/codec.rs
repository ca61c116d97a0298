//! Bidirectional mapping between [`FilterState`] and a flat query representation.
//!
//! `encode` omits every field sitting at its default, so the all-default state
//! is the empty query. `decode` never fails: unknown keys are ignored and a
//! malformed value only loses its own field.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::{AdStatus, FilterState, SortDirection, SortField, StatusSet, PAGE_SIZE};

pub const KEY_SEARCH: &str = "search";
pub const KEY_STATUS: &str = "status";
pub const KEY_CATEGORY: &str = "categoryId";
pub const KEY_MIN_PRICE: &str = "minPrice";
pub const KEY_MAX_PRICE: &str = "maxPrice";
pub const KEY_SORT_BY: &str = "sortBy";
pub const KEY_SORT_ORDER: &str = "sortOrder";
pub const KEY_PAGE: &str = "page";
pub const KEY_LIMIT: &str = "limit";

const KNOWN_KEYS: [&str; 8] = [
    KEY_SEARCH,
    KEY_STATUS,
    KEY_CATEGORY,
    KEY_MIN_PRICE,
    KEY_MAX_PRICE,
    KEY_SORT_BY,
    KEY_SORT_ORDER,
    KEY_PAGE,
];

/// Ordered key/value pairs for every non-default field.
pub fn encode(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !state.search.is_empty() {
        pairs.push((KEY_SEARCH, state.search.clone()));
    }
    if !state.statuses.is_empty() {
        pairs.push((KEY_STATUS, join_statuses(&state.statuses)));
    }
    if let Some(category_id) = state.category_id {
        pairs.push((KEY_CATEGORY, category_id.to_string()));
    }
    if let Some(min_price) = state.min_price {
        pairs.push((KEY_MIN_PRICE, min_price.to_string()));
    }
    if let Some(max_price) = state.max_price {
        pairs.push((KEY_MAX_PRICE, max_price.to_string()));
    }
    if state.sort_field != SortField::default() {
        pairs.push((KEY_SORT_BY, state.sort_field.as_str().to_string()));
    }
    if state.sort_direction != SortDirection::default() {
        pairs.push((KEY_SORT_ORDER, state.sort_direction.as_str().to_string()));
    }
    if state.page != 1 {
        pairs.push((KEY_PAGE, state.page.to_string()));
    }
    pairs
}

/// Form-urlencoded query without the leading `?`.
pub fn to_query_string(state: &FilterState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(encode(state))
        .finish()
}

/// Parses a query string, with or without the leading `?`.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    decode_pairs(form_urlencoded::parse(query.as_bytes()))
}

/// Builds a state from raw pairs; the first occurrence of a key wins.
pub fn decode_pairs<I, K, V>(pairs: I) -> FilterState
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut state = FilterState::default();
    let mut seen = BTreeSet::new();

    for (key, value) in pairs {
        let Some(key) = KNOWN_KEYS.iter().copied().find(|known| *known == key.as_ref()) else {
            continue;
        };
        if !seen.insert(key) {
            continue;
        }
        let value = value.as_ref();
        match key {
            KEY_SEARCH => state.search = value.to_string(),
            KEY_STATUS => state.statuses = parse_statuses(value),
            KEY_CATEGORY => state.category_id = value.trim().parse().ok(),
            KEY_MIN_PRICE => state.min_price = parse_price(value),
            KEY_MAX_PRICE => state.max_price = parse_price(value),
            KEY_SORT_BY => state.sort_field = SortField::parse(value).unwrap_or_default(),
            KEY_SORT_ORDER => {
                state.sort_direction = SortDirection::parse(value).unwrap_or_default();
            }
            KEY_PAGE => {
                state.page = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|page| *page >= 1)
                    .unwrap_or(1);
            }
            _ => {}
        }
    }

    state
}

/// Query parameters for the backend list endpoint.
///
/// Unlike [`encode`], paging and ordering are always sent and each selected
/// status becomes its own `status` pair.
pub fn api_query(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        (KEY_PAGE, state.page.max(1).to_string()),
        (KEY_LIMIT, PAGE_SIZE.to_string()),
        (KEY_SORT_BY, state.sort_field.as_str().to_string()),
        (KEY_SORT_ORDER, state.sort_direction.as_str().to_string()),
    ];
    if !state.search.is_empty() {
        pairs.push((KEY_SEARCH, state.search.clone()));
    }
    for status in &state.statuses {
        pairs.push((KEY_STATUS, status.as_str().to_string()));
    }
    if let Some(category_id) = state.category_id {
        pairs.push((KEY_CATEGORY, category_id.to_string()));
    }
    if let Some(min_price) = state.min_price {
        pairs.push((KEY_MIN_PRICE, min_price.to_string()));
    }
    if let Some(max_price) = state.max_price {
        pairs.push((KEY_MAX_PRICE, max_price.to_string()));
    }
    pairs
}

fn join_statuses(statuses: &StatusSet) -> String {
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_statuses(value: &str) -> StatusSet {
    value
        .split(',')
        .filter_map(|token| AdStatus::parse(token.trim()))
        .collect()
}

fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}
