//! Batch pipeline: dispatch every request, collect until the deadline, classify.

mod classify;
mod collect;
mod dispatch;

use histfetch_core::{BatchConfig, BatchReport, RequestSpec};

use crate::router::kind::FetchOperation;

/// Run one batch end to end.
///
/// `specs` must be non-empty with unique identifiers; the facade validates both.
pub(crate) async fn run(
    op: &FetchOperation,
    specs: Vec<RequestSpec>,
    cfg: &BatchConfig,
) -> BatchReport {
    let requested = specs.len();
    let inflight = dispatch::dispatch(op, specs, cfg.max_in_flight);
    let collected = collect::collect(inflight, cfg.deadline, cfg.pending).await;
    classify::classify(op.kind(), requested, collected)
}
