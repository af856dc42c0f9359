use std::time::Duration;

use crate::AlpacaConnector;
use crate::config::{Adjustment, AlpacaConfig, ConfigError, Credentials, Feed, parse_data_url};

/// Builder for [`AlpacaConnector`].
///
/// Either pass a complete [`AlpacaConfig`] or set credentials and adjust the defaults
/// one setting at a time. Settings applied after `config` override it.
#[derive(Debug, Default)]
pub struct AlpacaConnectorBuilder {
    base: Option<AlpacaConfig>,
    credentials: Option<Credentials>,
    data_url: Option<String>,
    feed: Option<Feed>,
    adjustment: Option<Adjustment>,
    page_limit: Option<u32>,
    http_timeout: Option<Duration>,
}

impl AlpacaConnectorBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration.
    #[must_use]
    pub fn config(mut self, cfg: AlpacaConfig) -> Self {
        self.base = Some(cfg);
        self
    }

    /// API credentials.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the data API base URL (tests, proxies).
    #[must_use]
    pub fn data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = Some(url.into());
        self
    }

    /// Query a specific feed.
    #[must_use]
    pub const fn feed(mut self, feed: Feed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Corporate-action adjustment for bars.
    #[must_use]
    pub const fn adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = Some(adjustment);
        self
    }

    /// Records per page (1 to 10 000).
    #[must_use]
    pub const fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Per-request HTTP timeout.
    #[must_use]
    pub const fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `MissingCredentials` when neither `config` nor `credentials` was called,
    /// and `InvalidUrl`/`InvalidValue`/`Http` for unusable settings.
    pub fn build(self) -> Result<AlpacaConnector, ConfigError> {
        let mut cfg = match (self.base, self.credentials) {
            (Some(mut cfg), creds) => {
                if let Some(c) = creds {
                    cfg.credentials = c;
                }
                cfg
            }
            (None, Some(c)) => AlpacaConfig::new(c)?,
            (None, None) => return Err(ConfigError::MissingCredentials),
        };
        if let Some(url) = self.data_url {
            cfg.data_url = parse_data_url(&url)?;
        }
        if let Some(feed) = self.feed {
            cfg.feed = Some(feed);
        }
        if let Some(adj) = self.adjustment {
            cfg.adjustment = Some(adj);
        }
        if let Some(limit) = self.page_limit {
            cfg.page_limit = limit;
        }
        if let Some(timeout) = self.http_timeout {
            cfg.http_timeout = timeout;
        }
        AlpacaConnector::from_config(cfg)
    }
}
