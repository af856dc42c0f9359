//! Response bodies of the historical stock endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use histfetch_core::{Bar, Quote, Trade};

/// One page of a historical response.
///
/// The records sit under `bars`, `trades`, or `quotes` depending on the endpoint, and
/// are `null` or absent when the window holds no data.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(alias = "bars", alias = "trades", alias = "quotes")]
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireBar {
    t: DateTime<Utc>,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: u64,
    #[serde(default)]
    n: Option<u64>,
    #[serde(default)]
    vw: Option<f64>,
}

impl From<WireBar> for Bar {
    fn from(w: WireBar) -> Self {
        Self {
            timestamp: w.t,
            open: w.o,
            high: w.h,
            low: w.l,
            close: w.c,
            volume: w.v,
            trade_count: w.n,
            vwap: w.vw,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTrade {
    t: DateTime<Utc>,
    #[serde(default)]
    x: Option<String>,
    p: f64,
    s: u64,
    #[serde(default)]
    c: Option<Vec<String>>,
    #[serde(default)]
    i: Option<u64>,
    #[serde(default)]
    z: Option<String>,
}

impl From<WireTrade> for Trade {
    fn from(w: WireTrade) -> Self {
        Self {
            timestamp: w.t,
            exchange: w.x,
            price: w.p,
            size: w.s,
            conditions: w.c.unwrap_or_default(),
            id: w.i,
            tape: w.z,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireQuote {
    t: DateTime<Utc>,
    #[serde(default)]
    ax: Option<String>,
    ap: f64,
    #[serde(rename = "as")]
    asz: u64,
    #[serde(default)]
    bx: Option<String>,
    bp: f64,
    bs: u64,
    #[serde(default)]
    c: Option<Vec<String>>,
    #[serde(default)]
    z: Option<String>,
}

impl From<WireQuote> for Quote {
    fn from(w: WireQuote) -> Self {
        Self {
            timestamp: w.t,
            ask_exchange: w.ax,
            ask_price: w.ap,
            ask_size: w.asz,
            bid_exchange: w.bx,
            bid_price: w.bp,
            bid_size: w.bs,
            conditions: w.c.unwrap_or_default(),
            tape: w.z,
        }
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}
