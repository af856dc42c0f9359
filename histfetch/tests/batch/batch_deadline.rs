use std::time::Duration;

use histfetch::{FetchOutcome, HistFetch, PendingPolicy};
use histfetch_mock::{DynamicMockConnector, MockBehavior};
use tokio::time::Instant;

use crate::helpers::{bar, window};

fn with_deadline(
    connector: std::sync::Arc<dyn histfetch::HistoricalConnector>,
    policy: PendingPolicy,
) -> HistFetch {
    HistFetch::builder()
        .with_connector(connector)
        .deadline(Duration::from_secs(1))
        .pending_policy(policy)
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn hung_request_is_unresolved_and_torn_down_under_cancel() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior("FAST", MockBehavior::Return(vec![bar(1.0)]))
        .await;
    controller.set_bars_behavior("SLOW", MockBehavior::Hang).await;

    let started = Instant::now();
    let report = with_deadline(mock, PendingPolicy::Cancel)
        .bars(&["FAST", "SLOW"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_secs(1), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "returned late: {elapsed:?}");

    let s = report.summary;
    assert_eq!(s.requested, 2);
    assert_eq!(s.completed, 1);
    assert_eq!(s.succeeded, 1);
    assert_eq!(s.unresolved, 1);
    assert_eq!(report.unresolved, ["SLOW"]);
    assert!(report.outcome("SLOW").is_none());

    // Nothing started by the batch outlives the call.
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(controller.abandoned(), 1);
}

#[tokio::test(start_paused = true)]
async fn hung_request_keeps_running_under_detach() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior("FAST", MockBehavior::Return(vec![bar(1.0)]))
        .await;
    controller.set_bars_behavior("SLOW", MockBehavior::Hang).await;

    let report = with_deadline(mock, PendingPolicy::Detach)
        .bars(&["FAST", "SLOW"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();

    assert_eq!(report.summary.completed, 1);
    assert_eq!(report.summary.unresolved, 1);
    assert_eq!(controller.in_flight(), 1);
    assert_eq!(controller.abandoned(), 0);
}

#[tokio::test(start_paused = true)]
async fn late_result_never_counts_as_completed() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior(
            "LATE",
            MockBehavior::Delay(Duration::from_secs(2), vec![bar(1.0)]),
        )
        .await;

    let report = with_deadline(mock, PendingPolicy::Detach)
        .bars(&["LATE"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();
    assert_eq!(report.summary.completed, 0);
    assert_eq!(report.unresolved, ["LATE"]);

    // The detached request finishes in the background; the report is unaffected.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(controller.abandoned(), 0);
    assert_eq!(report.summary.completed, 0);
}

#[tokio::test(start_paused = true)]
async fn deadline_is_per_batch_not_per_request() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    for (i, sym) in ["A", "B", "C"].into_iter().enumerate() {
        let delay = Duration::from_millis(400 * (i as u64 + 1));
        controller
            .set_bars_behavior(sym, MockBehavior::Delay(delay, vec![bar(1.0)]))
            .await;
    }

    // 400 ms and 800 ms resolve; 1200 ms misses the one-second batch budget.
    let report = with_deadline(mock, PendingPolicy::Cancel)
        .bars(&["A", "B", "C"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();
    let resolved: Vec<&str> = report.outcomes.iter().map(FetchOutcome::identifier).collect();
    assert_eq!(resolved, ["A", "B"]);
    assert_eq!(report.unresolved, ["C"]);
}

#[tokio::test(start_paused = true)]
async fn each_unresolved_identifier_gets_one_warning() {
    let (capture, _guard) = crate::helpers::capture::Capture::install();
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior("FAST", MockBehavior::Return(vec![bar(1.0)]))
        .await;
    controller.set_bars_behavior("SLOW1", MockBehavior::Hang).await;
    controller.set_bars_behavior("SLOW2", MockBehavior::Hang).await;

    let report = with_deadline(mock, PendingPolicy::Cancel)
        .bars(&["FAST", "SLOW1", "SLOW2"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();
    assert_eq!(report.unresolved, ["SLOW1", "SLOW2"]);

    let warned: Vec<String> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN && e.message.contains("unresolved at deadline"))
        .filter_map(|e| e.field("identifier").map(str::to_string))
        .collect();
    assert_eq!(warned, ["SLOW1", "SLOW2"]);
}

#[tokio::test(start_paused = true)]
async fn unrepresentable_deadline_waits_for_every_request() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior(
            "SLOW",
            MockBehavior::Delay(Duration::from_secs(3_600), vec![bar(1.0)]),
        )
        .await;

    let hf = HistFetch::builder()
        .with_connector(mock)
        .deadline(Duration::MAX)
        .build()
        .unwrap();
    let report = hf
        .bars(&["SLOW"], window(), histfetch::Granularity::MINUTE)
        .await
        .unwrap();

    assert_eq!(report.summary.completed, 1);
    assert!(report.unresolved.is_empty());
}
