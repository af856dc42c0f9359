// Re-export helpers so tests can `use crate::helpers::*;`
#[allow(dead_code)]
pub mod capture;

pub use mock_connector::MockConnector;

use std::sync::Arc;

use histfetch::{Bar, DateRange, HistFetch, HistoricalConnector, Quote, Trade};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const GOOGL: &str = "GOOGL";
pub const ZZZZ: &str = "ZZZZ";
#[allow(dead_code)]
pub const MSFT: &str = "MSFT";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// The reference window: 2021-02-10 16:30 to 16:45 UTC.
pub fn window() -> DateRange {
    DateRange::new(dt(2021, 2, 10, 16, 30, 0), dt(2021, 2, 10, 16, 45, 0)).expect("valid range")
}

/// A flat one-minute bar at `close`.
pub fn bar(close: f64) -> Bar {
    Bar {
        timestamp: window().start(),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000,
        trade_count: Some(10),
        vwap: Some(close),
    }
}

/// A single 100-share print at `price`.
#[allow(dead_code)]
pub fn trade(price: f64) -> Trade {
    Trade {
        timestamp: window().start(),
        exchange: Some("V".into()),
        price,
        size: 100,
        conditions: vec![],
        id: Some(1),
        tape: Some("C".into()),
    }
}

/// A one-cent-wide quote around `mid`.
#[allow(dead_code)]
pub fn quote(mid: f64) -> Quote {
    Quote {
        timestamp: window().start(),
        ask_exchange: Some("Q".into()),
        ask_price: mid + 0.005,
        ask_size: 1,
        bid_exchange: Some("P".into()),
        bid_price: mid - 0.005,
        bid_size: 1,
        conditions: vec![],
        tape: Some("C".into()),
    }
}

/// Build an orchestrator over `connector` with default configuration.
#[allow(dead_code)]
pub fn hf(connector: Arc<dyn HistoricalConnector>) -> HistFetch {
    HistFetch::builder()
        .with_connector(connector)
        .build()
        .expect("connector registered")
}
