use async_trait::async_trait;

use histfetch_types::{Bar, DataKind, DateRange, FetchError, Granularity, Quote, Trade};

/// Focused role trait for connectors that serve aggregated bars.
#[async_trait]
pub trait BarsProvider: Send + Sync {
    /// Fetch every bar for `symbol` inside `range` at the given resolution.
    ///
    /// An empty vector means the provider had no bars for the window.
    async fn bars(
        &self,
        symbol: &str,
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<Bar>, FetchError>;
}

/// Focused role trait for connectors that serve trade prints.
///
/// Trades have no resolution; the provider returns every print in the window.
#[async_trait]
pub trait TradesProvider: Send + Sync {
    /// Fetch every trade for `symbol` inside `range`.
    async fn trades(&self, symbol: &str, range: &DateRange) -> Result<Vec<Trade>, FetchError>;
}

/// Focused role trait for connectors that serve top-of-book quotes.
#[async_trait]
pub trait QuotesProvider: Send + Sync {
    /// Fetch every quote for `symbol` inside `range`.
    async fn quotes(&self, symbol: &str, range: &DateRange) -> Result<Vec<Quote>, FetchError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
///
/// Implementations must be safe to share across tasks: the orchestrator clones one
/// `Arc<dyn HistoricalConnector>` into every request of a batch.
pub trait HistoricalConnector: Send + Sync {
    /// A stable identifier used in diagnostics and error attribution (e.g. "histfetch-alpaca").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise bars capability by returning a usable trait object reference when supported.
    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        None
    }

    /// Advertise trades capability by returning a usable trait object reference when supported.
    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        None
    }

    /// Advertise quotes capability by returning a usable trait object reference when supported.
    fn as_quotes_provider(&self) -> Option<&dyn QuotesProvider> {
        None
    }

    /// Whether the connector advertises a provider for `kind`.
    fn supports(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Bars => self.as_bars_provider().is_some(),
            DataKind::Trades => self.as_trades_provider().is_some(),
            DataKind::Quotes => self.as_quotes_provider().is_some(),
        }
    }
}
