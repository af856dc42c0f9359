use chrono::TimeDelta;
use histfetch_core::{Bar, DateRange, Granularity, GranularityUnit};

use super::{base_price, instants, wiggle};

/// One bar per granularity step across the range.
pub fn by_symbol(symbol: &str, range: &DateRange, granularity: Granularity) -> Option<Vec<Bar>> {
    let base = base_price(symbol)?;
    let rows = instants(range, step(granularity))
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let open = base + wiggle(i);
            let close = base + wiggle(i + 1);
            Bar {
                timestamp,
                open,
                high: open.max(close) + 0.03,
                low: open.min(close) - 0.03,
                close,
                volume: 10_000 + (i as u64 % 5) * 1_250,
                trade_count: Some(120 + i as u64 % 7),
                vwap: Some((open + close) / 2.0),
            }
        })
        .collect();
    Some(rows)
}

fn step(g: Granularity) -> TimeDelta {
    let n = i64::from(g.amount());
    match g.unit() {
        GranularityUnit::Minute => TimeDelta::minutes(n),
        GranularityUnit::Hour => TimeDelta::hours(n),
        GranularityUnit::Day => TimeDelta::days(n),
        GranularityUnit::Week => TimeDelta::weeks(n),
        GranularityUnit::Month => TimeDelta::days(30 * n),
    }
}
