//! modq core: pure list state machine, filter codec and view-model helpers.
pub mod codec;
mod bulk;
mod effect;
mod filter;
mod msg;
mod poll;
mod selection;
mod state;
mod stats;
mod types;
mod update;
mod view_model;

pub use bulk::BulkReport;
pub use effect::Effect;
pub use filter::{FilterPatch, FilterState, SortDirection, SortField, StatusSet};
pub use msg::Msg;
pub use poll::{count_new_items, poll_filter};
pub use selection::SelectionSet;
pub use state::{ListState, RequestId};
pub use stats::{
    ActivityPoint, CategoryCounts, DecisionShare, Moderator, StatsFilter, StatsPeriod, StatsReport,
    StatsSummary,
};
pub use types::{
    AdStatus, Advertisement, EntityId, ModerationAction, Priority, ResultPage, Verdict,
    BULK_REJECT_COMMENT, BULK_REJECT_REASON, PAGE_SIZE, REJECTION_REASONS,
};
pub use update::update;
pub use view_model::{ListViewModel, PaginationView, RowView};
