use crate::{
    BulkReport, EntityId, FilterPatch, FilterState, ModerationAction, RequestId, ResultPage,
    SortField,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// List view opened with the query string of the current location.
    Mounted { query: String },
    /// User changed one or more filter fields.
    FilterChanged(FilterPatch),
    /// User clicked a sortable column.
    SortClicked(SortField),
    /// User navigated to another page.
    PageRequested(u32),
    /// User cleared every filter.
    ResetFilters,
    /// User loaded a saved filter preset.
    PresetApplied(FilterState),
    /// Explicit refresh, including the "new items" badge.
    RefreshRequested,
    /// List fetch settled with data or a transport failure.
    ListLoaded {
        request: RequestId,
        result: Result<ResultPage, String>,
    },
    /// List fetch was cancelled before it produced a result.
    ListCancelled { request: RequestId },
    /// Background poll returned the ids of the newest entities.
    PollCompleted { ids: Vec<EntityId> },
    /// User ticked or unticked one row.
    ToggleSelected(EntityId),
    SelectAll,
    /// Header checkbox: select every row, or none if all are selected.
    ToggleAll,
    ClearSelection,
    /// User started a bulk moderation action on the selection.
    BulkRequested(ModerationAction),
    /// Every action of the running batch has settled.
    BulkFinished(BulkReport),
    /// Fallback for placeholder wiring.
    NoOp,
}
