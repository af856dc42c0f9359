use chrono::TimeDelta;
use histfetch_core::{DateRange, Quote};

use super::{base_price, instants, wiggle};

/// A quote every fifteen seconds across the range, one cent wide.
pub fn by_symbol(symbol: &str, range: &DateRange) -> Option<Vec<Quote>> {
    let base = base_price(symbol)?;
    let rows = instants(range, TimeDelta::seconds(15))
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let bid = base + wiggle(i);
            Quote {
                timestamp,
                ask_exchange: Some("Q".to_string()),
                ask_price: bid + 0.01,
                ask_size: 2 + i as u64 % 3,
                bid_exchange: Some("P".to_string()),
                bid_price: bid,
                bid_size: 1 + i as u64 % 4,
                conditions: vec!["R".to_string()],
                tape: Some("C".to_string()),
            }
        })
        .collect();
    Some(rows)
}
