//! Maps a data kind to the provider call that serves it.

use std::sync::Arc;

use histfetch_core::{DataKind, FetchError, HistoricalConnector, Records, RequestSpec};

use crate::core::tag_err;

/// A resolved fetch operation: one connector, one data kind.
///
/// Produced by [`resolve`] only when the connector advertises a provider for the
/// kind, so every dispatched request targets a capability that exists. Cloning is
/// cheap and each batch task owns its own copy.
#[derive(Clone)]
pub(crate) struct FetchOperation {
    connector: Arc<dyn HistoricalConnector>,
    kind: DataKind,
}

/// Resolve the operation serving `kind` on `connector`.
///
/// # Errors
/// Returns `UnsupportedKind` when the connector does not advertise a provider for
/// `kind`. No request is issued in that case.
pub(crate) fn resolve(
    connector: &Arc<dyn HistoricalConnector>,
    kind: DataKind,
) -> Result<FetchOperation, FetchError> {
    let served = match kind {
        DataKind::Bars => connector.as_bars_provider().is_some(),
        DataKind::Trades => connector.as_trades_provider().is_some(),
        DataKind::Quotes => connector.as_quotes_provider().is_some(),
    };
    if !served {
        return Err(FetchError::unsupported_kind(format!(
            "{kind} (not served by {})",
            connector.name()
        )));
    }
    Ok(FetchOperation {
        connector: Arc::clone(connector),
        kind,
    })
}

impl FetchOperation {
    /// Kind of records this operation fetches.
    #[must_use]
    pub(crate) const fn kind(&self) -> DataKind {
        self.kind
    }

    /// Name of the connector the operation calls.
    #[must_use]
    pub(crate) fn connector_name(&self) -> &'static str {
        self.connector.name()
    }

    /// Issue exactly one provider call for `spec`.
    ///
    /// Bars forward the spec's granularity. Trades and quotes never do; their
    /// provider calls take none.
    ///
    /// # Errors
    /// Returns the provider's error for this identifier, with opaque errors attributed
    /// to the connector. Bars without a granularity fail with `InvalidArg`.
    pub(crate) async fn call(&self, spec: &RequestSpec) -> Result<Records, FetchError> {
        let name = self.connector.name();
        let c = self.connector.as_ref();
        let unsupported = || FetchError::unsupported_kind(self.kind.as_str());
        let res = match self.kind {
            DataKind::Bars => {
                let p = c.as_bars_provider().ok_or_else(unsupported)?;
                let granularity = spec.granularity.ok_or_else(|| {
                    FetchError::InvalidArg(format!("bars for {} need a granularity", spec.identifier))
                })?;
                p.bars(&spec.identifier, &spec.range, granularity)
                    .await
                    .map(Records::Bars)
            }
            DataKind::Trades => {
                let p = c.as_trades_provider().ok_or_else(unsupported)?;
                p.trades(&spec.identifier, &spec.range)
                    .await
                    .map(Records::Trades)
            }
            DataKind::Quotes => {
                let p = c.as_quotes_provider().ok_or_else(unsupported)?;
                p.quotes(&spec.identifier, &spec.range)
                    .await
                    .map(Records::Quotes)
            }
        };
        res.map_err(|e| tag_err(name, e))
    }
}
