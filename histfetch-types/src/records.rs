//! Typed historical records as returned by providers.
//!
//! Vendor-neutral shapes; each connector maps its own wire format into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::DataKind;

/// One aggregated OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar interval.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Number of trades in the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_count: Option<u64>,
    /// Volume-weighted average price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
}

/// One trade print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time.
    pub timestamp: DateTime<Utc>,
    /// Exchange code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub size: u64,
    /// Trade condition flags.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Provider trade id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Consolidated tape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape: Option<String>,
}

/// One top-of-book quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote time.
    pub timestamp: DateTime<Utc>,
    /// Ask exchange code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_exchange: Option<String>,
    /// Ask price.
    pub ask_price: f64,
    /// Ask size.
    pub ask_size: u64,
    /// Bid exchange code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_exchange: Option<String>,
    /// Bid price.
    pub bid_price: f64,
    /// Bid size.
    pub bid_size: u64,
    /// Quote condition flags.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Consolidated tape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape: Option<String>,
}

/// Records fetched for one identifier, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Records {
    /// Aggregated bars.
    Bars(Vec<Bar>),
    /// Trade prints.
    Trades(Vec<Trade>),
    /// Quotes.
    Quotes(Vec<Quote>),
}

impl Records {
    /// The kind of records held.
    #[must_use]
    pub const fn kind(&self) -> DataKind {
        match self {
            Self::Bars(_) => DataKind::Bars,
            Self::Trades(_) => DataKind::Trades,
            Self::Quotes(_) => DataKind::Quotes,
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bars(v) => v.len(),
            Self::Trades(v) => v.len(),
            Self::Quotes(v) => v.len(),
        }
    }

    /// True when the provider returned no records for the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
