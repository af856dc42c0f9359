use chrono::SecondsFormat;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use histfetch_core::{DataKind, DateRange, FetchError};

use crate::config::{AlpacaConfig, ConfigError};
use crate::wire::{ApiError, Page};

const HEADER_KEY_ID: &str = "APCA-API-KEY-ID";
const HEADER_SECRET_KEY: &str = "APCA-API-SECRET-KEY";

/// Thin HTTP client over the historical stock endpoints.
///
/// Holds one `reqwest::Client`, so every request of a batch shares its connection pool.
#[derive(Debug, Clone)]
pub(crate) struct AlpacaClient {
    http: reqwest::Client,
    cfg: AlpacaConfig,
}

impl AlpacaClient {
    pub(crate) fn new(cfg: AlpacaConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let http = reqwest::Client::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| ConfigError::Http(e.to_string()))?;
        Ok(Self { http, cfg })
    }

    pub(crate) const fn config(&self) -> &AlpacaConfig {
        &self.cfg
    }

    fn endpoint(&self, symbol: &str, kind: DataKind) -> Result<Url, FetchError> {
        let tail = match kind {
            DataKind::Bars => "bars",
            DataKind::Trades => "trades",
            DataKind::Quotes => "quotes",
        };
        let mut url = self.cfg.data_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::connector(crate::NAME, "data url cannot be a base"))?
            .pop_if_empty()
            .extend(["v2", "stocks", symbol, tail]);
        Ok(url)
    }

    /// Fetch every page for one symbol and kind, following `next_page_token`.
    ///
    /// `extra` carries the kind-specific query parameters (timeframe, adjustment).
    pub(crate) async fn fetch_all<T: DeserializeOwned>(
        &self,
        symbol: &str,
        kind: DataKind,
        range: &DateRange,
        extra: &[(&'static str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint(symbol, kind)?;
        let mut base: Vec<(&'static str, String)> = vec![
            ("start", range.start().to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("end", range.end().to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("limit", self.cfg.page_limit.to_string()),
        ];
        if let Some(feed) = self.cfg.feed {
            base.push(("feed", feed.as_str().to_string()));
        }
        base.extend(extra.iter().cloned());

        let mut out = Vec::new();
        let mut token: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let mut req = self
                .http
                .get(url.clone())
                .header(HEADER_KEY_ID, self.cfg.credentials.key_id())
                .header(HEADER_SECRET_KEY, self.cfg.credentials.secret_key())
                .query(&base);
            if let Some(t) = &token {
                req = req.query(&[("page_token", t.as_str())]);
            }

            let page: Page<T> = self.send(req, symbol, kind).await?;
            pages += 1;
            out.extend(page.items.unwrap_or_default());
            match page.next_page_token {
                Some(next) if token.as_deref() == Some(next.as_str()) => {
                    tracing::debug!(%kind, symbol, token = %next, "page token repeated; stopping");
                    break;
                }
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }
        tracing::debug!(%kind, symbol, pages, records = out.len(), "alpaca fetch complete");
        Ok(out)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        symbol: &str,
        kind: DataKind,
    ) -> Result<Page<T>, FetchError> {
        let resp = req
            .send()
            .await
            .map_err(|e| FetchError::connector(crate::NAME, format!("request failed: {e}")))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::connector(crate::NAME, format!("reading body: {e}")))?;

        if !status.is_success() {
            return Err(map_status(status, &body, symbol, kind));
        }
        serde_json::from_slice(&body)
            .map_err(|e| FetchError::Data(format!("{kind} for {symbol}: undecodable response: {e}")))
    }
}

fn map_status(status: StatusCode, body: &[u8], symbol: &str, kind: DataKind) -> FetchError {
    let detail = serde_json::from_slice::<ApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
    tracing::debug!(%kind, symbol, status = status.as_u16(), detail = %detail, "alpaca request rejected");
    match status.as_u16() {
        404 => FetchError::not_found(format!("{kind} for {symbol}")),
        400 | 422 => FetchError::InvalidArg(format!("{kind} for {symbol}: {detail}")),
        401 | 403 => FetchError::connector(crate::NAME, format!("unauthorized ({status})")),
        429 => FetchError::connector(crate::NAME, "rate limited"),
        _ => FetchError::connector(crate::NAME, format!("unexpected status {status}: {detail}")),
    }
}
