use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the histfetch workspace.
///
/// Batch-level problems (`UnsupportedKind`, `InvalidArg`) are raised before any
/// request is issued. Everything else describes why a single identifier failed
/// and travels inside a `FetchOutcome::Failure` instead of aborting the batch.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// The requested data kind is unknown or not served by the connector.
    #[error("unsupported data kind: {kind}")]
    UnsupportedKind {
        /// The kind as requested (e.g. "Bars" or an unrecognized name).
        kind: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (undecodable payload, missing fields).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "bars for ZZZZ".
        what: String,
    },

    /// The provider call for an identifier panicked before producing a result.
    #[error("fetch task for {identifier} panicked")]
    TaskPanicked {
        /// Identifier whose task panicked.
        identifier: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl FetchError {
    /// Helper: build an `UnsupportedKind` error.
    #[must_use]
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if this error should be surfaced to operators as actionable.
    ///
    /// A symbol the provider does not know is benign; everything else points at
    /// configuration, connectivity, or provider trouble.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }

    /// Returns true for errors raised before dispatch that reject the whole batch.
    #[must_use]
    pub const fn is_batch_level(&self) -> bool {
        matches!(self, Self::UnsupportedKind { .. } | Self::InvalidArg(_))
    }
}
