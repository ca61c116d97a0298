use std::fmt::Display;
use std::future::Future;

use futures_util::future::join_all;
use modq_core::{BulkReport, EntityId, ModerationAction};
use modq_logging::{modq_info, modq_warn};

use crate::transport::TransportFacade;

/// Starts `action` for every id at once and waits until all of them settle.
///
/// A failure never cancels or hides its siblings; every outcome ends up in
/// the report, in the order of `ids`.
pub async fn settle_all<F, Fut, T, E>(ids: Vec<EntityId>, action: F) -> BulkReport
where
    F: Fn(EntityId) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let outcomes = join_all(ids.into_iter().map(|id| {
        let pending = action(id);
        async move { (id, pending.await) }
    }))
    .await;

    let mut report = BulkReport::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(_) => report.succeeded.push(id),
            Err(err) => report.failed.push((id, err.to_string())),
        }
    }
    report
}

/// Applies one moderation action to every id through the facade.
pub async fn run_bulk(
    facade: &TransportFacade,
    action: &ModerationAction,
    ids: Vec<EntityId>,
) -> BulkReport {
    let report = settle_all(ids, |id| facade.mutate(id, action)).await;
    for (id, reason) in &report.failed {
        modq_warn!("Bulk {} failed for ad {}: {}", action, id, reason);
    }
    modq_info!(
        "Bulk {} finished: {} succeeded, {} failed",
        action,
        report.succeeded.len(),
        report.failed.len()
    );
    report
}
