use crate::{EntityId, FilterState, ModerationAction, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the query string of the current location.
    SyncUrl { query: String },
    /// Fetch a page, superseding any list fetch still in flight.
    FetchList {
        request: RequestId,
        filter: FilterState,
    },
    /// Apply `action` to every id concurrently and report back with `Msg::BulkFinished`.
    RunBulk {
        action: ModerationAction,
        ids: Vec<EntityId>,
    },
}
