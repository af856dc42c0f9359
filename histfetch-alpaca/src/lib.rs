//! histfetch-alpaca
//!
//! Connector that implements `HistoricalConnector` on top of the Alpaca market-data
//! v2 REST API. Serves historical bars, trades, and quotes for US stocks, following
//! pagination until the requested window is exhausted.
//!
//! ```rust,ignore
//! let alpaca = histfetch_alpaca::AlpacaConnector::from_env()?;
//! let hf = histfetch::HistFetch::builder()
//!     .with_connector(std::sync::Arc::new(alpaca))
//!     .build()?;
//! ```
#![warn(missing_docs)]

mod builder;
mod client;
/// Credentials, feed selection, and other connection settings.
pub mod config;
mod wire;

use async_trait::async_trait;
use histfetch_core::connector::{
    BarsProvider, HistoricalConnector, QuotesProvider, TradesProvider,
};
use histfetch_core::{Bar, DataKind, DateRange, FetchError, Granularity, Quote, Trade};

pub use builder::AlpacaConnectorBuilder;
use client::AlpacaClient;
pub use config::{Adjustment, AlpacaConfig, ConfigError, Credentials, Feed};
use wire::{WireBar, WireQuote, WireTrade};

pub(crate) const NAME: &str = "histfetch-alpaca";

/// Connector for the Alpaca historical stock data endpoints.
///
/// Safe to share across tasks; all requests go through one pooled HTTP client.
#[derive(Debug, Clone)]
pub struct AlpacaConnector {
    client: AlpacaClient,
}

impl AlpacaConnector {
    /// Connector name used in diagnostics and error attribution.
    pub const NAME: &'static str = NAME;

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> AlpacaConnectorBuilder {
        AlpacaConnectorBuilder::new()
    }

    /// Build a connector from `APCA_*` environment variables.
    ///
    /// # Errors
    /// Returns a `ConfigError` when credentials are missing or an override is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().config(AlpacaConfig::from_env()?).build()
    }

    pub(crate) fn from_config(cfg: AlpacaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: AlpacaClient::new(cfg)?,
        })
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &AlpacaConfig {
        self.client.config()
    }
}

impl HistoricalConnector for AlpacaConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Alpaca"
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
impl BarsProvider for AlpacaConnector {
    #[tracing::instrument(name = "alpaca::bars", skip(self, range, granularity), fields(timeframe = %granularity))]
    async fn bars(
        &self,
        symbol: &str,
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<Bar>, FetchError> {
        let mut extra = vec![("timeframe", granularity.to_string())];
        if let Some(adj) = self.config().adjustment {
            extra.push(("adjustment", adj.as_str().to_string()));
        }
        let raw: Vec<WireBar> = self
            .client
            .fetch_all(symbol, DataKind::Bars, range, &extra)
            .await?;
        Ok(raw.into_iter().map(Bar::from).collect())
    }
}

#[async_trait]
impl TradesProvider for AlpacaConnector {
    #[tracing::instrument(name = "alpaca::trades", skip(self, range))]
    async fn trades(&self, symbol: &str, range: &DateRange) -> Result<Vec<Trade>, FetchError> {
        let raw: Vec<WireTrade> = self
            .client
            .fetch_all(symbol, DataKind::Trades, range, &[])
            .await?;
        Ok(raw.into_iter().map(Trade::from).collect())
    }
}

#[async_trait]
impl QuotesProvider for AlpacaConnector {
    #[tracing::instrument(name = "alpaca::quotes", skip(self, range))]
    async fn quotes(&self, symbol: &str, range: &DateRange) -> Result<Vec<Quote>, FetchError> {
        let raw: Vec<WireQuote> = self
            .client
            .fetch_all(symbol, DataKind::Quotes, range, &[])
            .await?;
        Ok(raw.into_iter().map(Quote::from).collect())
    }
}
