//! Structured log events for the retrieval pipeline.

use fathom_core::models::StageDiagnostics;

/// A stage fell back to an empty result.
pub fn stage_degraded(stage: &str, failure: &str) {
    tracing::warn!(
        event = "stage_degraded",
        stage = %stage,
        failure = %failure,
        "stage degraded to empty result"
    );
}

/// A request was cancelled; partial results are discarded.
pub fn request_cancelled(stage: &str) {
    tracing::info!(event = "request_cancelled", stage = %stage, "request cancelled");
}

/// A request completed.
pub fn context_assembled(diagnostics: &StageDiagnostics) {
    tracing::info!(
        event = "context_assembled",
        intent = ?diagnostics.intent,
        vector_hits = diagnostics.vector_hits,
        graph_results = diagnostics.graph_results,
        merged = diagnostics.merged_results,
        accepted = diagnostics.accepted_results,
        tokens_used = diagnostics.tokens_used,
        token_budget = diagnostics.token_budget,
        degraded = diagnostics.degraded(),
        "context assembled"
    );
}
