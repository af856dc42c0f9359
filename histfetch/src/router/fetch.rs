use std::collections::HashSet;

use histfetch_core::{BatchReport, DataKind, DateRange, FetchError, Granularity, RequestSpec};

use crate::HistFetch;
use crate::batch;
use crate::router::kind::resolve;

impl HistFetch {
    /// Fetch `kind` records for every symbol over `range`, one concurrent request each.
    ///
    /// Behavior and trade-offs:
    /// - Kind support, identifiers, and granularity are validated before anything is
    ///   dispatched; a rejected batch issues no request.
    /// - `granularity` is forwarded only for kinds that take one (bars). For trades and
    ///   quotes it is ignored.
    /// - Per-identifier failures are contained as `Failure` outcomes; the call itself
    ///   only fails for batch-level problems.
    /// - Returns no later than the configured deadline after dispatch, plus teardown of
    ///   cancelled requests under `PendingPolicy::Cancel`.
    ///
    /// # Errors
    /// - `UnsupportedKind` if the connector does not serve `kind`.
    /// - `InvalidArg` for blank or duplicate identifiers, or bars without a granularity.
    #[tracing::instrument(
        name = "histfetch::fetch",
        skip(self, kind, symbols, range),
        fields(
            kind = %kind,
            connector = self.connector.name(),
            symbols = symbols.len(),
        ),
    )]
    pub async fn fetch<S: AsRef<str> + Sync>(
        &self,
        kind: DataKind,
        symbols: &[S],
        range: DateRange,
        granularity: Option<Granularity>,
    ) -> Result<BatchReport, FetchError> {
        let op = resolve(&self.connector, kind)?;

        if symbols.is_empty() {
            return Ok(BatchReport::empty(kind));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for s in symbols {
            let symbol = s.as_ref();
            if symbol.trim().is_empty() {
                return Err(FetchError::InvalidArg(
                    "blank symbol in symbols list".to_string(),
                ));
            }
            if !seen.insert(symbol) {
                return Err(FetchError::InvalidArg(format!(
                    "duplicate symbol '{symbol}' in symbols list"
                )));
            }
        }

        let granularity = if kind.takes_granularity() {
            Some(granularity.ok_or_else(|| {
                FetchError::InvalidArg(format!("{kind} require a granularity"))
            })?)
        } else {
            if let Some(g) = granularity {
                tracing::debug!(%kind, granularity = %g, "granularity ignored for this kind");
            }
            None
        };

        match granularity {
            Some(g) => tracing::info!(
                "Getting {kind} data for {} symbols, timeframe: {g} between dates: start={}, end={}",
                symbols.len(),
                range.start().to_rfc3339(),
                range.end().to_rfc3339(),
            ),
            None => tracing::info!(
                "Getting {kind} data for {} symbols between dates: start={}, end={}",
                symbols.len(),
                range.start().to_rfc3339(),
                range.end().to_rfc3339(),
            ),
        }

        let specs: Vec<RequestSpec> = symbols
            .iter()
            .map(|s| RequestSpec::new(s.as_ref(), kind, range, granularity))
            .collect();

        Ok(batch::run(&op, specs, &self.cfg).await)
    }
}
