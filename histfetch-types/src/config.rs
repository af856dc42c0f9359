//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock budget for one batch.
pub const DEFAULT_BATCH_DEADLINE: Duration = Duration::from_secs(600);

/// What happens to requests still in flight when the batch deadline expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PendingPolicy {
    /// Signal cancellation, abort outstanding requests, and wait for their teardown
    /// before returning. Nothing started by the batch outlives the call.
    #[default]
    Cancel,
    /// Leave outstanding requests running in the background, unobserved.
    /// Their results are discarded; they keep connections open until they finish.
    Detach,
}

/// Global configuration for the `HistFetch` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Wall-clock budget for collecting a batch, measured from the start of the wait.
    pub deadline: Duration,
    /// Treatment of requests still outstanding at the deadline.
    pub pending: PendingPolicy,
    /// Optional cap on simultaneous outbound requests per batch.
    ///
    /// `None` issues every request at once, so provider load grows linearly with
    /// batch size.
    pub max_in_flight: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_BATCH_DEADLINE,
            pending: PendingPolicy::default(),
            max_in_flight: None,
        }
    }
}
