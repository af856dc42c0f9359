use std::time::Duration;

use histfetch::{Granularity, HistFetch};
use histfetch_mock::{DynamicMockConnector, MockBehavior};
use tokio::time::Instant;

use crate::helpers::{bar, window};

const SYMBOLS: [&str; 10] = ["S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9"];

async fn slow_mock() -> (
    std::sync::Arc<dyn histfetch::HistoricalConnector>,
    histfetch_mock::DynamicMockController,
) {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    for s in SYMBOLS {
        controller
            .set_bars_behavior(
                s,
                MockBehavior::Delay(Duration::from_secs(1), vec![bar(1.0)]),
            )
            .await;
    }
    (mock, controller)
}

#[tokio::test(start_paused = true)]
async fn unbounded_batch_issues_every_request_at_once() {
    let (mock, controller) = slow_mock().await;
    let fetcher = HistFetch::builder().with_connector(mock).build().unwrap();

    let started = Instant::now();
    let report = fetcher
        .bars(&SYMBOLS, window(), Granularity::MINUTE)
        .await
        .unwrap();

    assert_eq!(report.summary.succeeded, SYMBOLS.len());
    assert_eq!(controller.peak_in_flight(), SYMBOLS.len());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn max_in_flight_caps_simultaneous_requests() {
    let (mock, controller) = slow_mock().await;
    let fetcher = HistFetch::builder()
        .with_connector(mock)
        .max_in_flight(3)
        .build()
        .unwrap();

    let started = Instant::now();
    let report = fetcher
        .bars(&SYMBOLS, window(), Granularity::MINUTE)
        .await
        .unwrap();

    assert_eq!(report.summary.succeeded, SYMBOLS.len());
    assert_eq!(controller.peak_in_flight(), 3);
    // Four waves of one second each.
    assert!(started.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn waiting_for_a_slot_counts_against_the_deadline() {
    let (mock, _controller) = slow_mock().await;
    let fetcher = HistFetch::builder()
        .with_connector(mock)
        .max_in_flight(5)
        .deadline(Duration::from_millis(1500))
        .build()
        .unwrap();

    let report = fetcher
        .bars(&SYMBOLS, window(), Granularity::MINUTE)
        .await
        .unwrap();
    assert_eq!(report.summary.completed, 5);
    assert_eq!(report.summary.unresolved, 5);
}
