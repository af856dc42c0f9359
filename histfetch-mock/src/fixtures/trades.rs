use chrono::TimeDelta;
use histfetch_core::{DateRange, Trade};

use super::{base_price, instants, wiggle};

const EXCHANGES: [&str; 3] = ["V", "Q", "P"];

/// A print every ten seconds across the range.
pub fn by_symbol(symbol: &str, range: &DateRange) -> Option<Vec<Trade>> {
    let base = base_price(symbol)?;
    let rows = instants(range, TimeDelta::seconds(10))
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| Trade {
            timestamp,
            exchange: Some(EXCHANGES[i % EXCHANGES.len()].to_string()),
            price: base + wiggle(i),
            size: 100 * (1 + i as u64 % 4),
            conditions: vec!["@".to_string()],
            id: Some(52_983_525_029_461 + i as u64),
            tape: Some("C".to_string()),
        })
        .collect();
    Some(rows)
}
