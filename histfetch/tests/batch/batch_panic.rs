use histfetch::{FetchError, FetchOutcome};
use histfetch_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{AAPL, hf, quote, window};

#[tokio::test]
async fn panicking_provider_call_becomes_a_failure() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_quotes_behavior(AAPL, MockBehavior::Return(vec![quote(10.0)]))
        .await;
    controller.set_quotes_behavior("BOOM", MockBehavior::Panic).await;

    let report = hf(mock).quotes(&[AAPL, "BOOM"], window()).await.unwrap();

    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.unresolved, 0);
    match report.outcome("BOOM") {
        Some(FetchOutcome::Failure { error, .. }) => assert_eq!(
            error,
            &FetchError::TaskPanicked {
                identifier: "BOOM".into()
            }
        ),
        other => panic!("unexpected: {other:?}"),
    }
}
