//! histfetch fetches historical market records for many symbols at once.
//!
//! Overview
//! - One request per symbol, all issued concurrently against a single connector that
//!   implements the `histfetch_core` contracts.
//! - One wall-clock deadline for the whole batch. Whatever resolved in time is
//!   returned; identifiers still outstanding are listed as unresolved.
//! - A failing or panicking request becomes a `Failure` outcome for its identifier
//!   and never disturbs the rest of the batch.
//!
//! Key behaviors and trade-offs
//! - Pending policy at the deadline:
//!   - `Cancel` (default): outstanding requests are cancelled and torn down before the
//!     call returns; nothing outlives the batch.
//!   - `Detach`: outstanding requests keep running in the background and their results
//!     are discarded; the call returns slightly sooner but connections stay open.
//! - Concurrency: unbounded by default, so provider load grows with batch size. Set
//!   `max_in_flight` to cap simultaneous requests at the cost of a longer batch.
//! - Kind support is checked before dispatch: asking a connector for a kind it does not
//!   serve fails the call with `UnsupportedKind` and issues no request at all.
//! - The `dataframe` feature converts fetched `Records` into Polars frames and
//!   describes their price column.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use histfetch::{DateRange, Granularity, HistFetch};
//!
//! let alpaca = Arc::new(histfetch_alpaca::AlpacaConnector::from_env()?);
//! let hf = HistFetch::builder()
//!     .with_connector(alpaca)
//!     .deadline(Duration::from_secs(60))
//!     .build()?;
//!
//! let range = DateRange::parse("2021-02-10T16:30:00Z", "2021-02-10T16:45:00Z")?;
//! let report = hf.bars(&["AAPL", "GOOGL", "ZZZZ"], range, Granularity::MINUTE).await?;
//! println!("{}", report.summary);
//! for (symbol, records) in report.successes() {
//!     println!("{symbol}: {} bars", records.len());
//! }
//! ```
//!
//! See `histfetch/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

mod batch;
pub(crate) mod core;
mod router;

pub use core::{HistFetch, HistFetchBuilder};

// Re-export core types for convenience
pub use histfetch_core::{
    Bar, BarsProvider, BatchConfig, BatchReport, BatchSummary, DataKind, DateRange,
    FetchError, FetchOutcome, Granularity, GranularityUnit, HistoricalConnector, PendingPolicy,
    Quote, QuotesProvider, Records, RequestSpec, SeriesStats, Trade, TradesProvider,
};

#[cfg(feature = "dataframe")]
pub use histfetch_core::{ToDataFrame, describe, describe_records, price_column};
