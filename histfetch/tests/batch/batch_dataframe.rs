#![cfg(feature = "dataframe")]

use histfetch::{Granularity, ToDataFrame, describe_records};
use histfetch_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{AAPL, GOOGL, bar, hf, quote, window};

#[tokio::test]
async fn each_success_describes_through_a_dataframe() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_bars_behavior(AAPL, MockBehavior::Return(vec![bar(1.0), bar(2.0), bar(3.0)]))
        .await;
    controller
        .set_bars_behavior(GOOGL, MockBehavior::Return(vec![]))
        .await;

    let report = hf(mock)
        .bars(&[AAPL, GOOGL], window(), Granularity::MINUTE)
        .await
        .unwrap();

    let frames: Vec<_> = report
        .successes()
        .map(|(symbol, records)| (symbol.to_string(), records.to_dataframe().unwrap()))
        .collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].1.height(), 3);
    assert_eq!(frames[1].1.height(), 0);

    let (_, aapl) = report.successes().next().unwrap();
    let stats = describe_records(aapl).unwrap();
    let mean = stats
        .column("close")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .get(1);
    assert_eq!(mean, Some(2.0));
}

#[tokio::test]
async fn quotes_describe_the_midpoint() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_quotes_behavior(AAPL, MockBehavior::Return(vec![quote(10.0), quote(20.0)]))
        .await;

    let report = hf(mock).quotes(&[AAPL], window()).await.unwrap();
    let (_, records) = report.successes().next().unwrap();
    let stats = describe_records(records).unwrap();
    assert!(stats.column("mid").is_ok());
    assert_eq!(stats.height(), 8);
}
