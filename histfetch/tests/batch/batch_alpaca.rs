use std::sync::Arc;
use std::time::Duration;

use histfetch::{DataKind, FetchError, Granularity, HistFetch};
use histfetch_alpaca::{AlpacaConnector, Credentials};
use httpmock::{Method::GET, MockServer};

use crate::helpers::{AAPL, GOOGL, ZZZZ, window};

fn alpaca(server: &MockServer) -> Arc<AlpacaConnector> {
    Arc::new(
        AlpacaConnector::builder()
            .credentials(Credentials::new("PKTEST", "secret").unwrap())
            .data_url(server.base_url())
            .build()
            .unwrap(),
    )
}

fn bars_body(close: f64) -> String {
    serde_json::json!({
        "bars": [
            {"t": "2021-02-10T16:30:00Z", "o": close, "h": close, "l": close, "c": close, "v": 10}
        ],
        "symbol": "X",
        "next_page_token": null
    })
    .to_string()
}

#[tokio::test]
async fn alpaca_batch_contains_a_missing_symbol() {
    let server = MockServer::start();
    for (symbol, close) in [(AAPL, 136.4), (GOOGL, 2095.0)] {
        server.mock(|when, then| {
            when.method(GET).path(format!("/v2/stocks/{symbol}/bars"));
            then.status(200)
                .header("content-type", "application/json")
                .body(bars_body(close));
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/v2/stocks/ZZZZ/bars");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"message":"not found"}"#);
    });

    let hf = HistFetch::builder()
        .with_connector(alpaca(&server))
        .deadline(Duration::from_secs(10))
        .build()
        .unwrap();
    let report = hf
        .bars(&[AAPL, GOOGL, ZZZZ], window(), Granularity::MINUTE)
        .await
        .unwrap();

    assert_eq!(report.summary.kind, DataKind::Bars);
    assert_eq!(report.summary.requested, 3);
    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.unresolved, 0);
    assert_eq!(
        report.outcome(ZZZZ).and_then(|o| o.error()),
        Some(&FetchError::not_found("Bars for ZZZZ"))
    );
}
