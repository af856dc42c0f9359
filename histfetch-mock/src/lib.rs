//! Mock histfetch connectors for tests and CI-safe examples.
//!
//! - [`MockConnector`]: deterministic fixture data for a fixed symbol list, no network.
//! - [`DynamicMockConnector`]: per-symbol scripted behavior plus a call log, driven
//!   from tests through a [`DynamicMockController`].
use std::time::Duration;

use async_trait::async_trait;
use histfetch_core::connector::{BarsProvider, HistoricalConnector, QuotesProvider, TradesProvider};
use histfetch_core::{Bar, DataKind, DateRange, FetchError, Granularity, Quote, Trade};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Symbols the static mock serves, in the order of the reference batch.
pub const FIXTURE_SYMBOLS: &[&str] = &[
    "AAPL", "AMZN", "GS", "JPM", "GOOGL", "ABNB", "BARK", "APRN", "CHWY", "CAG", "LLY", "FND",
    "EDU", "PYPL", "PEBO", "RBLX", "SHAK", "SHOP", "TDOC", "VRTX", "VICI",
];

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Special symbols:
/// - `FAIL`: every call fails with a connector error.
/// - `TIMEOUT`: every call sleeps 200 ms before answering `NotFound`.
///
/// Any other symbol without fixtures answers `NotFound`.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector name used in diagnostics.
    pub const NAME: &'static str = "histfetch-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(kind: DataKind, symbol: &str) -> FetchError {
        FetchError::not_found(format!("{kind} for {symbol}"))
    }

    async fn maybe_fail_or_timeout(symbol: &str, kind: DataKind) -> Result<(), FetchError> {
        match symbol {
            "FAIL" => Err(FetchError::connector(
                Self::NAME,
                format!("forced failure: {kind}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl HistoricalConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self as &dyn BarsProvider)
    }

    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        Some(self as &dyn TradesProvider)
    }

    fn as_quotes_provider(&self) -> Option<&dyn QuotesProvider> {
        Some(self as &dyn QuotesProvider)
    }
}

#[async_trait]
impl BarsProvider for MockConnector {
    async fn bars(
        &self,
        symbol: &str,
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<Bar>, FetchError> {
        Self::maybe_fail_or_timeout(symbol, DataKind::Bars).await?;
        fixtures::bars::by_symbol(symbol, range, granularity)
            .ok_or_else(|| Self::not_found(DataKind::Bars, symbol))
    }
}

#[async_trait]
impl TradesProvider for MockConnector {
    async fn trades(&self, symbol: &str, range: &DateRange) -> Result<Vec<Trade>, FetchError> {
        Self::maybe_fail_or_timeout(symbol, DataKind::Trades).await?;
        fixtures::trades::by_symbol(symbol, range)
            .ok_or_else(|| Self::not_found(DataKind::Trades, symbol))
    }
}

#[async_trait]
impl QuotesProvider for MockConnector {
    async fn quotes(&self, symbol: &str, range: &DateRange) -> Result<Vec<Quote>, FetchError> {
        Self::maybe_fail_or_timeout(symbol, DataKind::Quotes).await?;
        fixtures::quotes::by_symbol(symbol, range)
            .ok_or_else(|| Self::not_found(DataKind::Quotes, symbol))
    }
}
