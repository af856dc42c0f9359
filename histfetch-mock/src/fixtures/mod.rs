use chrono::{DateTime, TimeDelta, Utc};
use histfetch_core::DateRange;

pub mod bars;
pub mod quotes;
pub mod trades;

/// Upper bound on rows generated per symbol and call.
pub const MAX_ROWS: usize = 500;

const BASE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 136.40),
    ("AMZN", 3_280.00),
    ("GS", 292.50),
    ("JPM", 146.20),
    ("GOOGL", 2_095.00),
    ("ABNB", 208.00),
    ("BARK", 11.20),
    ("APRN", 10.90),
    ("CHWY", 111.80),
    ("CAG", 35.40),
    ("LLY", 208.60),
    ("FND", 102.30),
    ("EDU", 18.70),
    ("PYPL", 294.00),
    ("PEBO", 30.10),
    ("RBLX", 69.50),
    ("SHAK", 121.00),
    ("SHOP", 1_492.00),
    ("TDOC", 283.00),
    ("VRTX", 224.50),
    ("VICI", 29.60),
    ("MSFT", 243.00),
    ("TSLA", 808.00),
];

/// Reference price for symbols with fixture data.
pub fn base_price(symbol: &str) -> Option<f64> {
    BASE_PRICES
        .iter()
        .find_map(|(s, px)| (*s == symbol).then_some(*px))
}

/// Instants from `range.start()` stepping by `step`, inclusive of the end, capped at
/// [`MAX_ROWS`].
pub fn instants(range: &DateRange, step: TimeDelta) -> Vec<DateTime<Utc>> {
    let mut out = Vec::new();
    let mut t = range.start();
    while t <= range.end() && out.len() < MAX_ROWS {
        out.push(t);
        t += step;
    }
    out
}

/// Small deterministic price offset for the `i`-th row.
#[allow(clippy::cast_precision_loss)]
pub fn wiggle(i: usize) -> f64 {
    ((i * 7) % 11) as f64 * 0.01 - 0.05
}
