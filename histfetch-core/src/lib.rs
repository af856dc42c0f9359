//! histfetch-core
//!
//! Contracts shared between the histfetch orchestrator and its connectors.
//!
//! - `connector`: the `HistoricalConnector` trait and the per-kind provider traits.
//! - `stats`: descriptive statistics over a fetched price column.
//! - `dataframe` (feature `dataframe`): Polars frames built from fetched records.
//!
//! All foundational types from `histfetch-types` are re-exported so connector
//! crates can depend on `histfetch-core` only.
#![warn(missing_docs)]

/// Connector capability traits and the primary `HistoricalConnector` interface.
pub mod connector;
/// Polars conversions for fetched records.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Descriptive statistics for fetched series.
pub mod stats;

pub use connector::{BarsProvider, HistoricalConnector, QuotesProvider, TradesProvider};
#[cfg(feature = "dataframe")]
pub use dataframe::{ToDataFrame, describe, describe_records, price_column};
pub use histfetch_types::*;
pub use stats::SeriesStats;
