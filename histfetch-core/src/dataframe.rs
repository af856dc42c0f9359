//! Polars views over fetched records.
//!
//! Each record kind becomes one row per record with a `timestamp` column in UTC
//! milliseconds. Quote frames carry a derived `mid` column.

use polars::prelude::*;

use histfetch_types::{Bar, DataKind, Quote, Records, Trade};

/// Converts fetched records into a Polars `DataFrame`.
pub trait ToDataFrame {
    /// Build the frame. An empty input yields a zero-row frame with the full schema.
    ///
    /// # Errors
    /// Returns a Polars error if a column cannot be built.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

/// Column holding the representative price of `kind`.
///
/// Bars use the close, trades the print price, quotes the bid/ask midpoint.
#[must_use]
pub const fn price_column(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Bars => "close",
        DataKind::Trades => "price",
        DataKind::Quotes => "mid",
    }
}

const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summarize one numeric column as a `statistic`/value frame.
///
/// Rows are count, mean, sample standard deviation, min, linear-interpolated
/// quartiles, and max. Nulls and non-finite values are dropped first.
///
/// # Errors
/// Returns a Polars error if `column` is missing or not `f64`.
pub fn describe(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let values: Vec<f64> = df
        .column(column)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    let ca = Float64Chunked::from_vec(column.into(), values);

    #[allow(clippy::cast_precision_loss)]
    let count = ca.len() as f64;
    let stats = vec![
        Some(count),
        ca.mean(),
        ca.std(1),
        ca.min(),
        ca.quantile(0.25, QuantileMethod::Linear)?,
        ca.quantile(0.50, QuantileMethod::Linear)?,
        ca.quantile(0.75, QuantileMethod::Linear)?,
        ca.max(),
    ];
    DataFrame::new(vec![
        Column::new("statistic".into(), STATISTICS),
        Column::new(column.into(), stats),
    ])
}

/// Convert `records` and describe their representative price column.
///
/// # Errors
/// Returns a Polars error if the frame cannot be built.
pub fn describe_records(records: &Records) -> PolarsResult<DataFrame> {
    describe(&records.to_dataframe()?, price_column(records.kind()))
}

fn timestamp_column<I>(millis: I) -> PolarsResult<Column>
where
    I: IntoIterator<Item = i64>,
{
    Column::new("timestamp".into(), millis.into_iter().collect::<Vec<_>>())
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
}

fn joined(conditions: &[String]) -> String {
    conditions.join(",")
}

impl ToDataFrame for [Bar] {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            timestamp_column(self.iter().map(|b| b.timestamp.timestamp_millis()))?,
            Column::new("open".into(), self.iter().map(|b| b.open).collect::<Vec<_>>()),
            Column::new("high".into(), self.iter().map(|b| b.high).collect::<Vec<_>>()),
            Column::new("low".into(), self.iter().map(|b| b.low).collect::<Vec<_>>()),
            Column::new("close".into(), self.iter().map(|b| b.close).collect::<Vec<_>>()),
            Column::new("volume".into(), self.iter().map(|b| b.volume).collect::<Vec<_>>()),
            Column::new(
                "trade_count".into(),
                self.iter().map(|b| b.trade_count).collect::<Vec<_>>(),
            ),
            Column::new("vwap".into(), self.iter().map(|b| b.vwap).collect::<Vec<_>>()),
        ])
    }
}

impl ToDataFrame for [Trade] {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            timestamp_column(self.iter().map(|t| t.timestamp.timestamp_millis()))?,
            Column::new(
                "exchange".into(),
                self.iter().map(|t| t.exchange.clone()).collect::<Vec<_>>(),
            ),
            Column::new("price".into(), self.iter().map(|t| t.price).collect::<Vec<_>>()),
            Column::new("size".into(), self.iter().map(|t| t.size).collect::<Vec<_>>()),
            Column::new(
                "conditions".into(),
                self.iter().map(|t| joined(&t.conditions)).collect::<Vec<_>>(),
            ),
            Column::new("id".into(), self.iter().map(|t| t.id).collect::<Vec<_>>()),
            Column::new("tape".into(), self.iter().map(|t| t.tape.clone()).collect::<Vec<_>>()),
        ])
    }
}

impl ToDataFrame for [Quote] {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            timestamp_column(self.iter().map(|q| q.timestamp.timestamp_millis()))?,
            Column::new(
                "ask_exchange".into(),
                self.iter().map(|q| q.ask_exchange.clone()).collect::<Vec<_>>(),
            ),
            Column::new("ask_price".into(), self.iter().map(|q| q.ask_price).collect::<Vec<_>>()),
            Column::new("ask_size".into(), self.iter().map(|q| q.ask_size).collect::<Vec<_>>()),
            Column::new(
                "bid_exchange".into(),
                self.iter().map(|q| q.bid_exchange.clone()).collect::<Vec<_>>(),
            ),
            Column::new("bid_price".into(), self.iter().map(|q| q.bid_price).collect::<Vec<_>>()),
            Column::new("bid_size".into(), self.iter().map(|q| q.bid_size).collect::<Vec<_>>()),
            Column::new(
                "mid".into(),
                self.iter()
                    .map(|q| (q.ask_price + q.bid_price) / 2.0)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "conditions".into(),
                self.iter().map(|q| joined(&q.conditions)).collect::<Vec<_>>(),
            ),
            Column::new("tape".into(), self.iter().map(|q| q.tape.clone()).collect::<Vec<_>>()),
        ])
    }
}

impl ToDataFrame for Records {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        match self {
            Self::Bars(v) => v.as_slice().to_dataframe(),
            Self::Trades(v) => v.as_slice().to_dataframe(),
            Self::Quotes(v) => v.as_slice().to_dataframe(),
        }
    }
}
