//! histfetch-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod kind;
mod records;
mod reports;
mod request;

pub use config::{BatchConfig, DEFAULT_BATCH_DEADLINE, PendingPolicy};
pub use error::FetchError;
pub use kind::{DataKind, Granularity, GranularityUnit};
pub use records::{Bar, Quote, Records, Trade};
pub use reports::{BatchReport, BatchSummary, FetchOutcome};
pub use request::{DateRange, RequestSpec};
