use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use histfetch_core::{FetchError, FetchOutcome, RequestSpec};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::router::kind::FetchOperation;

/// Output of one batch task: its input index and, unless cancelled first, its outcome.
pub(crate) type TaskOutput = (usize, Option<FetchOutcome>);

/// Every launched request of a batch, owned by the collector from here on.
pub(crate) struct InFlight {
    pub(crate) set: JoinSet<TaskOutput>,
    /// Identifiers by input index.
    pub(crate) identifiers: Vec<String>,
    /// Cancelled when the batch stops waiting.
    pub(crate) token: CancellationToken,
}

/// Spawn one task per spec, in input order, without waiting on any of them.
///
/// Each task issues exactly one provider call. A panic inside the call is caught
/// and becomes a `TaskPanicked` failure for that identifier. With a cap, tasks wait
/// for a permit before calling the provider.
pub(crate) fn dispatch(
    op: &FetchOperation,
    specs: Vec<RequestSpec>,
    max_in_flight: Option<usize>,
) -> InFlight {
    let token = CancellationToken::new();
    let permits = max_in_flight.map(|n| Arc::new(Semaphore::new(n)));
    let mut set = JoinSet::new();
    let mut identifiers = Vec::with_capacity(specs.len());

    for (idx, spec) in specs.into_iter().enumerate() {
        identifiers.push(spec.identifier.clone());
        let op = op.clone();
        let token = token.clone();
        let permits = permits.clone();

        set.spawn(async move {
            let work = async move {
                // Held until the provider call returns.
                let _permit = match permits {
                    Some(sem) => match sem.acquire_owned().await {
                        Ok(p) => Some(p),
                        Err(_) => {
                            return FetchOutcome::Failure {
                                identifier: spec.identifier,
                                error: FetchError::Other("concurrency limiter closed".into()),
                            };
                        }
                    },
                    None => None,
                };
                let res = AssertUnwindSafe(op.call(&spec)).catch_unwind().await;
                let identifier = spec.identifier;
                match res {
                    Ok(Ok(records)) => FetchOutcome::Success {
                        identifier,
                        records,
                    },
                    Ok(Err(error)) => FetchOutcome::Failure { identifier, error },
                    Err(_) => FetchOutcome::Failure {
                        error: FetchError::TaskPanicked {
                            identifier: identifier.clone(),
                        },
                        identifier,
                    },
                }
            };
            (idx, token.run_until_cancelled(work).await)
        });
    }

    tracing::debug!(
        launched = identifiers.len(),
        connector = op.connector_name(),
        "batch dispatched"
    );

    InFlight {
        set,
        identifiers,
        token,
    }
}
