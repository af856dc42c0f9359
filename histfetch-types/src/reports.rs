//! Outcome and report envelopes produced by the batch orchestrator.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::kind::DataKind;
use crate::records::Records;

/// Resolved result of one identifier's request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// The provider returned records (possibly none for the window).
    Success {
        /// Requested identifier.
        identifier: String,
        /// Records returned for the identifier.
        records: Records,
    },
    /// The request failed; the rest of the batch is unaffected.
    Failure {
        /// Requested identifier.
        identifier: String,
        /// Why the request failed.
        error: FetchError,
    },
}

impl FetchOutcome {
    /// Identifier this outcome belongs to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Success { identifier, .. } | Self::Failure { identifier, .. } => identifier,
        }
    }

    /// True for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Records when successful.
    #[must_use]
    pub const fn records(&self) -> Option<&Records> {
        match self {
            Self::Success { records, .. } => Some(records),
            Self::Failure { .. } => None,
        }
    }

    /// Error when failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure { error, .. } => Some(error),
            Self::Success { .. } => None,
        }
    }
}

/// Completion statistics for one batch.
///
/// Always satisfies `requested == succeeded + failed + unresolved` and
/// `completed == succeeded + failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Kind of records requested.
    pub kind: DataKind,
    /// Identifiers submitted.
    pub requested: usize,
    /// Identifiers that resolved before the deadline.
    pub completed: usize,
    /// Resolved identifiers that succeeded.
    pub succeeded: usize,
    /// Resolved identifiers that failed.
    pub failed: usize,
    /// Identifiers still outstanding when the deadline expired.
    pub unresolved: usize,
}

impl BatchSummary {
    /// Summary of a batch that requested nothing.
    #[must_use]
    pub const fn empty(kind: DataKind) -> Self {
        Self {
            kind,
            requested: 0,
            completed: 0,
            succeeded: 0,
            failed: 0,
            unresolved: 0,
        }
    }

    /// True when every requested identifier resolved in time.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} completed ({} succeeded, {} failed, {} unresolved at deadline)",
            self.kind,
            self.completed,
            self.requested,
            self.succeeded,
            self.failed,
            self.unresolved
        )
    }
}

/// Everything a batch call returns: the summary, every resolved outcome, and the
/// identifiers that did not resolve before the deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Completion statistics.
    pub summary: BatchSummary,
    /// Resolved outcomes in the input order of their identifiers.
    pub outcomes: Vec<FetchOutcome>,
    /// Identifiers still outstanding at the deadline, in input order.
    pub unresolved: Vec<String>,
}

impl BatchReport {
    /// Report for a batch with no identifiers.
    #[must_use]
    pub const fn empty(kind: DataKind) -> Self {
        Self {
            summary: BatchSummary::empty(kind),
            outcomes: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Successful identifiers with their records.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &Records)> {
        self.outcomes.iter().filter_map(|o| match o {
            FetchOutcome::Success {
                identifier,
                records,
            } => Some((identifier.as_str(), records)),
            FetchOutcome::Failure { .. } => None,
        })
    }

    /// Failed identifiers with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FetchOutcome::Failure { identifier, error } => Some((identifier.as_str(), error)),
            FetchOutcome::Success { .. } => None,
        })
    }

    /// Outcome for a specific identifier, if it resolved.
    #[must_use]
    pub fn outcome(&self, identifier: &str) -> Option<&FetchOutcome> {
        self.outcomes.iter().find(|o| o.identifier() == identifier)
    }
}
