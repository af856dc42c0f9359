use histfetch_core::{BatchReport, DataKind, DateRange, FetchError};

use crate::HistFetch;

impl HistFetch {
    /// Fetch top-of-book quotes for every symbol over `range`.
    ///
    /// Behavior and trade-offs:
    /// - Quote history is dense; a wide range on a liquid symbol can take many provider
    ///   pages and is the most likely kind to hit the batch deadline.
    /// - Symbols unknown to the provider come back as `Failure` outcomes without
    ///   affecting the others.
    ///
    /// # Errors
    /// Returns `UnsupportedKind` if the connector serves no quotes, or `InvalidArg` for
    /// blank or duplicate symbols.
    pub async fn quotes<S: AsRef<str> + Sync>(
        &self,
        symbols: &[S],
        range: DateRange,
    ) -> Result<BatchReport, FetchError> {
        self.fetch(DataKind::Quotes, symbols, range, None).await
    }
}
