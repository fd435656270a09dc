use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// How a pipeline stage finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// Ran and returned its results.
    #[default]
    Completed,
    /// An upstream collaborator failed; the stage returned empty.
    Degraded,
    /// Not run (disabled or no input).
    Skipped,
}

/// Per-query stage counts, for logging and metrics aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDiagnostics {
    pub intent: Option<Intent>,
    pub query_variants: usize,
    pub context_sections: usize,
    pub vector_hits: usize,
    pub mapped_nodes: usize,
    pub traversed_nodes: usize,
    pub hydrated_nodes: usize,
    pub graph_results: usize,
    pub merged_results: usize,
    pub accepted_results: usize,
    pub tokens_used: usize,
    pub token_budget: usize,
    pub understanding: StageOutcome,
    pub vector: StageOutcome,
    pub graph: StageOutcome,
}

impl StageDiagnostics {
    /// Whether any stage fell back to an empty result.
    pub fn degraded(&self) -> bool {
        [self.understanding, self.vector, self.graph]
            .iter()
            .any(|s| *s == StageOutcome::Degraded)
    }
}
