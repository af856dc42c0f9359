use histfetch_core::{BatchReport, BatchSummary, DataKind, FetchOutcome};

use super::collect::Collected;

/// Partition collected outcomes, emit diagnostics, and build the report.
///
/// One `warn` event per failure and per unresolved identifier precedes the single
/// `info` summary line. Outcomes are returned in input order.
pub(crate) fn classify(kind: DataKind, requested: usize, collected: Collected) -> BatchReport {
    let Collected {
        mut resolved,
        unresolved,
    } = collected;
    resolved.sort_unstable_by_key(|(idx, _)| *idx);

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for (_, outcome) in &resolved {
        match outcome {
            FetchOutcome::Success { .. } => succeeded += 1,
            FetchOutcome::Failure { identifier, error } => {
                failed += 1;
                tracing::warn!(
                    %identifier,
                    %error,
                    actionable = error.is_actionable(),
                    "Failed to get {kind} for {identifier}: {error}"
                );
            }
        }
    }
    for identifier in &unresolved {
        tracing::warn!(%identifier, "{kind} for {identifier} unresolved at deadline");
    }

    let summary = BatchSummary {
        kind,
        requested,
        completed: succeeded + failed,
        succeeded,
        failed,
        unresolved: unresolved.len(),
    };
    tracing::info!(
        requested,
        succeeded,
        failed,
        unresolved = summary.unresolved,
        "{summary}"
    );

    BatchReport {
        summary,
        outcomes: resolved.into_iter().map(|(_, o)| o).collect(),
        unresolved,
    }
}
