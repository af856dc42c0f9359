use std::sync::Arc;
use std::time::Duration;

use histfetch_core::{BatchConfig, FetchError, HistoricalConnector, PendingPolicy};

/// Orchestrator that fans a batch of identifiers out to one connector.
pub struct HistFetch {
    pub(crate) connector: Arc<dyn HistoricalConnector>,
    pub(crate) cfg: BatchConfig,
}

/// Builder for constructing a `HistFetch` orchestrator with custom configuration.
pub struct HistFetchBuilder {
    connector: Option<Arc<dyn HistoricalConnector>>,
    cfg: BatchConfig,
}

impl Default for HistFetchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistFetchBuilder {
    /// Create a new builder with the default batch configuration.
    ///
    /// Defaults: 600 s batch deadline, outstanding requests cancelled at the
    /// deadline, no cap on simultaneous requests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: BatchConfig::default(),
        }
    }

    /// Register the provider connector. A later call replaces an earlier one.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn HistoricalConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole batch configuration.
    #[must_use]
    pub fn config(mut self, cfg: BatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the wall-clock budget for collecting one batch.
    ///
    /// Behavior and trade-offs:
    /// - Measured from the moment the orchestrator starts waiting on the batch.
    /// - A short deadline bounds latency but leaves slow identifiers unresolved.
    #[must_use]
    pub const fn deadline(mut self, deadline: Duration) -> Self {
        self.cfg.deadline = deadline;
        self
    }

    /// Choose what happens to requests still outstanding at the deadline.
    #[must_use]
    pub const fn pending_policy(mut self, policy: PendingPolicy) -> Self {
        self.cfg.pending = policy;
        self
    }

    /// Cap the number of simultaneous requests per batch.
    ///
    /// Requests beyond the cap wait for a slot; waiting counts against the deadline.
    #[must_use]
    pub const fn max_in_flight(mut self, limit: usize) -> Self {
        self.cfg.max_in_flight = Some(limit);
        self
    }

    /// Build the `HistFetch` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was registered via [`with_connector`](Self::with_connector)
    /// or if `max_in_flight` is zero.
    pub fn build(self) -> Result<HistFetch, FetchError> {
        let Some(connector) = self.connector else {
            return Err(FetchError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if self.cfg.max_in_flight == Some(0) {
            return Err(FetchError::InvalidArg(
                "max_in_flight must be at least 1".to_string(),
            ));
        }

        Ok(HistFetch {
            connector,
            cfg: self.cfg,
        })
    }
}

/// Attribute opaque provider errors to the connector that raised them.
pub(crate) fn tag_err(connector: &str, e: FetchError) -> FetchError {
    match e {
        FetchError::Other(msg) => FetchError::Connector {
            connector: connector.to_string(),
            msg,
        },
        other => other,
    }
}

impl HistFetch {
    /// Start building a new `HistFetch` instance.
    ///
    /// ```rust,ignore
    /// let hf = histfetch::HistFetch::builder()
    ///     .with_connector(connector)
    ///     .deadline(std::time::Duration::from_secs(30))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> HistFetchBuilder {
        HistFetchBuilder::new()
    }

    /// The registered connector.
    #[must_use]
    pub fn connector(&self) -> &Arc<dyn HistoricalConnector> {
        &self.connector
    }

    /// The effective batch configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.cfg
    }
}
