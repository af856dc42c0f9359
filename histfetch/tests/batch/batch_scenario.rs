use std::sync::Arc;

use histfetch::{DataKind, FetchError, FetchOutcome, Granularity, Records};
use histfetch_mock::{DynamicMockConnector, FIXTURE_SYMBOLS, MockBehavior};

use crate::helpers::{AAPL, GOOGL, MockConnector, ZZZZ, bar, hf, quote, window};

#[tokio::test]
async fn two_successes_and_one_permanent_failure() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior(AAPL, MockBehavior::Return(vec![bar(136.4)]))
        .await;
    controller
        .set_bars_behavior(GOOGL, MockBehavior::Return(vec![bar(2095.0)]))
        .await;
    controller
        .set_bars_behavior(
            ZZZZ,
            MockBehavior::Fail(FetchError::not_found("bars for ZZZZ")),
        )
        .await;

    let report = hf(mock)
        .bars(&[AAPL, GOOGL, ZZZZ], window(), Granularity::MINUTE)
        .await
        .unwrap();

    let s = report.summary;
    assert_eq!(s.kind, DataKind::Bars);
    assert_eq!(s.requested, 3);
    assert_eq!(s.succeeded, 2);
    assert_eq!(s.failed, 1);
    assert_eq!(s.completed, 3);
    assert_eq!(s.unresolved, 0);
    assert!(report.unresolved.is_empty());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, ZZZZ);
    assert!(matches!(failures[0].1, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn static_mock_reference_scenario_for_quotes() {
    let report = hf(Arc::new(histfetch_mock::MockConnector::new()))
        .quotes(&[AAPL, GOOGL, ZZZZ], window())
        .await
        .unwrap();
    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.failed, 1);
    let aapl = report.outcome(AAPL).and_then(FetchOutcome::records).unwrap();
    assert_eq!(aapl.kind(), DataKind::Quotes);
    assert!(!aapl.is_empty());
}

#[tokio::test]
async fn fast_batch_resolves_every_identifier() {
    let report = hf(Arc::new(histfetch_mock::MockConnector::new()))
        .trades(FIXTURE_SYMBOLS, window(), None)
        .await
        .unwrap();
    let s = report.summary;
    assert_eq!(s.requested, FIXTURE_SYMBOLS.len());
    assert_eq!(s.completed, s.requested);
    assert_eq!(s.unresolved, 0);
    assert!(s.is_complete());
}

#[tokio::test(start_paused = true)]
async fn outcomes_follow_input_order_not_completion_order() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_quotes_behavior(
            "SLOWEST",
            MockBehavior::Delay(std::time::Duration::from_secs(3), vec![quote(1.0)]),
        )
        .await;
    controller
        .set_quotes_behavior(
            "SLOWER",
            MockBehavior::Delay(std::time::Duration::from_secs(2), vec![quote(2.0)]),
        )
        .await;
    controller
        .set_quotes_behavior("FAST", MockBehavior::Return(vec![quote(3.0)]))
        .await;

    let report = hf(mock)
        .quotes(&["SLOWEST", "SLOWER", "FAST"], window())
        .await
        .unwrap();
    let ids: Vec<&str> = report.outcomes.iter().map(FetchOutcome::identifier).collect();
    assert_eq!(ids, ["SLOWEST", "SLOWER", "FAST"]);
}

#[tokio::test]
async fn identifier_and_range_reach_the_provider_unchanged() {
    let conn = MockConnector::builder()
        .name("echo")
        .with_trades_fn(|symbol, range| {
            assert_eq!(*range, window());
            Ok(vec![crate::helpers::trade(if symbol == AAPL { 1.0 } else { 2.0 })])
        })
        .build();

    let report = hf(conn).trades(&[AAPL, GOOGL], window(), None).await.unwrap();
    match report.outcome(GOOGL) {
        Some(FetchOutcome::Success {
            records: Records::Trades(t),
            ..
        }) => assert!((t[0].price - 2.0).abs() < f64::EPSILON),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn opaque_provider_errors_are_attributed_to_the_connector() {
    let conn = MockConnector::builder()
        .name("flaky")
        .with_quotes_fn(|_, _| Err(FetchError::Other("socket closed".into())))
        .build();

    let report = hf(conn).quotes(&[AAPL], window()).await.unwrap();
    let (_, err) = report.failures().next().unwrap();
    assert_eq!(err, &FetchError::connector("flaky", "socket closed"));
}

#[tokio::test]
async fn repeated_batches_against_a_deterministic_provider_agree() {
    let fetcher = hf(Arc::new(histfetch_mock::MockConnector::new()));
    let symbols = [AAPL, GOOGL, ZZZZ, "FAIL"];
    let a = fetcher
        .bars(&symbols, window(), Granularity::MINUTE)
        .await
        .unwrap();
    let b = fetcher
        .bars(&symbols, window(), Granularity::MINUTE)
        .await
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.summary.failed, 2);
}

#[tokio::test]
async fn failure_diagnostic_precedes_the_single_summary_line() {
    let (capture, _guard) = crate::helpers::capture::Capture::install();
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior(AAPL, MockBehavior::Return(vec![bar(136.4)]))
        .await;
    controller
        .set_bars_behavior(GOOGL, MockBehavior::Return(vec![bar(2095.0)]))
        .await;
    controller
        .set_bars_behavior(
            ZZZZ,
            MockBehavior::Fail(FetchError::not_found("bars for ZZZZ")),
        )
        .await;

    hf(mock)
        .bars(&[AAPL, GOOGL, ZZZZ], window(), Granularity::MINUTE)
        .await
        .unwrap();

    let events = capture.events();
    let warns: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.level == tracing::Level::WARN)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(warns.len(), 1, "events: {events:?}");
    let failure = &events[warns[0]];
    assert_eq!(failure.field("identifier"), Some(ZZZZ));
    assert!(failure.message.contains("Failed to get Bars for ZZZZ"));

    let summaries: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.level == tracing::Level::INFO && e.message.contains("completed"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(summaries.len(), 1, "events: {events:?}");
    assert!(warns[0] < summaries[0]);
    assert_eq!(
        events[summaries[0]].message,
        "Bars: 3 of 3 completed (2 succeeded, 1 failed, 0 unresolved at deadline)"
    );
}
