//! Connection settings for the Alpaca data API.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Default market-data endpoint.
pub const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";
/// Largest page the historical endpoints accept.
pub const MAX_PAGE_LIMIT: u32 = 10_000;
/// Per-request HTTP timeout used unless overridden.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_KEY_ID: &str = "APCA_API_KEY_ID";
const ENV_SECRET_KEY: &str = "APCA_API_SECRET_KEY";
const ENV_DATA_URL: &str = "APCA_API_DATA_URL";
const ENV_DATA_FEED: &str = "APCA_DATA_FEED";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// No credentials were supplied to the builder.
    #[error("missing credentials; supply them via credentials(...) or from_env()")]
    MissingCredentials,
    /// The data URL could not be used as a base for request paths.
    #[error("invalid data url '{url}': {reason}")]
    InvalidUrl {
        /// Offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A setting was outside its accepted values.
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Setting name.
        name: String,
        /// Offending value.
        value: String,
    },
    /// The HTTP client could not be constructed.
    #[error("http client: {0}")]
    Http(String),
}

/// Alpaca API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from an API key id and secret.
    ///
    /// # Errors
    /// Returns `EmptyValue` if either part is blank.
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, ConfigError> {
        let key_id = key_id.into();
        let secret_key = secret_key.into();
        if key_id.trim().is_empty() {
            return Err(ConfigError::EmptyValue(ENV_KEY_ID.to_string()));
        }
        if secret_key.trim().is_empty() {
            return Err(ConfigError::EmptyValue(ENV_SECRET_KEY.to_string()));
        }
        Ok(Self { key_id, secret_key })
    }

    /// Read `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY` from the environment.
    ///
    /// # Errors
    /// Returns `MissingEnvVar` or `EmptyValue` for either variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key_id = required(&lookup, ENV_KEY_ID)?;
        let secret_key = required(&lookup, ENV_SECRET_KEY)?;
        Self::new(key_id, secret_key)
    }

    /// API key id.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// API secret key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Market-data feed to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Consolidated feed across all exchanges (paid plans).
    Sip,
    /// IEX only (free plans).
    Iex,
}

impl Feed {
    /// Value sent in the `feed` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Iex => "iex",
        }
    }
}

impl FromStr for Feed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(Self::Sip),
            "iex" => Ok(Self::Iex),
            _ => Err(ConfigError::InvalidValue {
                name: "feed".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Corporate-action adjustment applied to bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// No adjustment.
    Raw,
    /// Adjusted for splits.
    Split,
    /// Adjusted for dividends.
    Dividend,
    /// Adjusted for splits and dividends.
    All,
}

impl Adjustment {
    /// Value sent in the `adjustment` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Split => "split",
            Self::Dividend => "dividend",
            Self::All => "all",
        }
    }
}

impl FromStr for Adjustment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "split" => Ok(Self::Split),
            "dividend" => Ok(Self::Dividend),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidValue {
                name: "adjustment".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the connector needs to talk to the data API.
#[derive(Debug, Clone)]
pub struct AlpacaConfig {
    /// API credentials sent with every request.
    pub credentials: Credentials,
    /// Base URL of the data API.
    pub data_url: Url,
    /// Feed to query; the API picks one per plan when unset.
    pub feed: Option<Feed>,
    /// Adjustment for bars; the API default (raw) when unset.
    pub adjustment: Option<Adjustment>,
    /// Records per page, 1 to 10 000.
    pub page_limit: u32,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl AlpacaConfig {
    /// Defaults around the given credentials.
    ///
    /// # Errors
    /// Never in practice; the default URL is a valid constant.
    pub fn new(credentials: Credentials) -> Result<Self, ConfigError> {
        Ok(Self {
            credentials,
            data_url: parse_data_url(DEFAULT_DATA_URL)?,
            feed: None,
            adjustment: None,
            page_limit: MAX_PAGE_LIMIT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }

    /// Load the configuration from the environment.
    ///
    /// Reads credentials from `APCA_API_KEY_ID` / `APCA_API_SECRET_KEY`, and the optional
    /// `APCA_API_DATA_URL` and `APCA_DATA_FEED` overrides.
    ///
    /// # Errors
    /// Returns a `ConfigError` for missing credentials or unusable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::new(Credentials::from_lookup(&lookup)?)?;
        if let Some(url) = optional(&lookup, ENV_DATA_URL) {
            cfg.data_url = parse_data_url(&url)?;
        }
        if let Some(feed) = optional(&lookup, ENV_DATA_FEED) {
            cfg.feed = Some(feed.parse()?);
        }
        Ok(cfg)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 || self.page_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::InvalidValue {
                name: "page_limit".to_string(),
                value: self.page_limit.to_string(),
            });
        }
        if self.data_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: self.data_url.to_string(),
                reason: "not a base url".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse and check a data URL; only http and https are accepted.
pub(crate) fn parse_data_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}
