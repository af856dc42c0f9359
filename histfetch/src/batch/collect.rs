use std::time::Duration;

use histfetch_core::{FetchOutcome, PendingPolicy};
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;

use super::dispatch::{InFlight, TaskOutput};

/// What a batch produced by its deadline.
#[derive(Debug)]
pub(crate) struct Collected {
    /// Outcomes tagged with the input index of their identifier, in completion order.
    pub(crate) resolved: Vec<(usize, FetchOutcome)>,
    /// Identifiers with no outcome at the deadline, in input order.
    pub(crate) unresolved: Vec<String>,
}

/// Wait on every launched task, but no longer than `deadline` from now.
///
/// A deadline too far out to represent as an instant waits for every task.
/// Each task is observed at most once. Anything that finishes after the deadline is
/// discarded, whatever the policy.
pub(crate) async fn collect(
    inflight: InFlight,
    deadline: Duration,
    policy: PendingPolicy,
) -> Collected {
    let InFlight {
        mut set,
        identifiers,
        token,
    } = inflight;
    let until = Instant::now().checked_add(deadline);
    let mut done = vec![false; identifiers.len()];
    let mut resolved = Vec::with_capacity(identifiers.len());

    loop {
        let next = match until {
            Some(until) => timeout_at(until, set.join_next()).await,
            None => Ok(set.join_next().await),
        };
        match next {
            Ok(Some(Ok((idx, Some(outcome))))) => {
                done[idx] = true;
                resolved.push((idx, outcome));
            }
            // Only reachable once the token fired, which happens after this loop.
            Ok(Some(Ok((_, None)))) => {}
            Ok(Some(Err(e))) => {
                tracing::debug!(error = %e, "batch task ended without an outcome");
            }
            Ok(None) => break,
            Err(_) => {
                tracing::debug!(
                    outstanding = set.len(),
                    deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                    "batch deadline reached"
                );
                release(set, &token, policy).await;
                break;
            }
        }
    }

    let unresolved = identifiers
        .into_iter()
        .zip(done)
        .filter_map(|(id, ok)| (!ok).then_some(id))
        .collect();

    Collected {
        resolved,
        unresolved,
    }
}

async fn release(mut set: JoinSet<TaskOutput>, token: &CancellationToken, policy: PendingPolicy) {
    match policy {
        PendingPolicy::Detach => set.detach_all(),
        _ => {
            token.cancel();
            set.abort_all();
            while set.join_next().await.is_some() {}
        }
    }
}
