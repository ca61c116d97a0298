mod common;

use std::time::Duration;

use common::{init_logging, FakeTransport};
use modq_core::{StatsFilter, StatsPeriod};
use modq_engine::{FailureKind, RequestKey, TransportFacade};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn report_combines_summary_and_charts() {
    init_logging();
    let transport = FakeTransport::new(&[]);
    let facade = TransportFacade::new(transport.clone());

    let report = facade
        .stats_report(StatsFilter::for_period(StatsPeriod::Today))
        .await
        .expect("report");

    assert_eq!(report.summary.total_reviewed, 120);
    assert_eq!(report.activity.len(), 1);
    assert_eq!(report.decisions.approved, 75.0);
    assert_eq!(
        report.categories.keys().collect::<Vec<_>>(),
        vec!["Транспорт", "Электроника"]
    );
    assert_eq!(
        transport.stats_filters(),
        vec![StatsFilter::for_period(StatsPeriod::Today)]
    );
    assert!(!facade.registry().is_pending(RequestKey::Stats));
}

#[tokio::test]
async fn one_failing_chart_fails_the_report() {
    init_logging();
    let transport = FakeTransport::new(&[]);
    transport.fail_categories();
    let facade = TransportFacade::new(transport);

    let err = facade
        .stats_report(StatsFilter::default())
        .await
        .expect_err("categories failed");
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn newer_report_supersedes_a_pending_one() {
    init_logging();
    let transport = FakeTransport::new(&[]);
    transport.stall_categories();
    let facade = TransportFacade::new(transport);

    let first = tokio::spawn(facade.stats_report(StatsFilter::default()));
    let _second = facade.stats_report(StatsFilter::for_period(StatsPeriod::Month));

    let err = tokio::time::timeout(Duration::from_secs(1), first)
        .await
        .expect("superseded promptly")
        .expect("join")
        .expect_err("cancelled");
    assert!(err.is_cancelled());
    assert!(facade.registry().is_pending(RequestKey::Stats));
}

#[tokio::test]
async fn moderator_profile_is_fetched_through_the_facade() {
    init_logging();
    let facade = TransportFacade::new(FakeTransport::new(&[]));

    let moderator = facade.current_moderator().await.expect("moderator");
    assert_eq!(moderator.id, 1);
    assert_eq!(moderator.role, "moderator");
}
