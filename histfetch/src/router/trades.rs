use histfetch_core::{BatchReport, DataKind, DateRange, FetchError, Granularity};

use crate::HistFetch;

impl HistFetch {
    /// Fetch every trade print for every symbol over `range`.
    ///
    /// `granularity` is accepted for call-site symmetry with [`bars`](Self::bars) but is
    /// never forwarded: the provider's trades call has no resolution parameter. Passing
    /// one only produces a `debug` event.
    ///
    /// # Errors
    /// Returns `UnsupportedKind` if the connector serves no trades, or `InvalidArg` for
    /// blank or duplicate symbols.
    pub async fn trades<S: AsRef<str> + Sync>(
        &self,
        symbols: &[S],
        range: DateRange,
        granularity: Option<Granularity>,
    ) -> Result<BatchReport, FetchError> {
        self.fetch(DataKind::Trades, symbols, range, granularity)
            .await
    }
}
