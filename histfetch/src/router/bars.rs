use histfetch_core::{BatchReport, DataKind, DateRange, FetchError, Granularity};

use crate::HistFetch;

impl HistFetch {
    /// Fetch aggregated bars at `granularity` for every symbol over `range`.
    ///
    /// The granularity is forwarded unchanged to every provider call.
    ///
    /// # Errors
    /// Returns `UnsupportedKind` if the connector serves no bars, or `InvalidArg` for
    /// blank or duplicate symbols. Per-symbol failures are reported inside the
    /// returned [`BatchReport`].
    pub async fn bars<S: AsRef<str> + Sync>(
        &self,
        symbols: &[S],
        range: DateRange,
        granularity: Granularity,
    ) -> Result<BatchReport, FetchError> {
        self.fetch(DataKind::Bars, symbols, range, Some(granularity))
            .await
    }
}
