//! Per-intent hit rate, token efficiency, source mix and degradation counts.

use std::collections::BTreeMap;

use fathom_core::intent::Intent;
use fathom_core::models::{StageDiagnostics, StageOutcome};
use serde::{Deserialize, Serialize};

const UNKNOWN_INTENT: &str = "UNKNOWN";

/// Aggregated retrieval effectiveness. Keys are intent names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    /// Queries per intent.
    pub queries_by_intent: BTreeMap<String, u64>,
    /// Queries per intent that produced at least one accepted result.
    pub hits_by_intent: BTreeMap<String, u64>,
    pub total_tokens_used: u64,
    pub total_tokens_budgeted: u64,
    pub total_vector_hits: u64,
    pub total_graph_results: u64,
    pub total_hydrated_nodes: u64,
    /// Degraded-stage counts keyed by stage name.
    pub degraded_stages: BTreeMap<String, u64>,
    pub graph_skipped: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one request's diagnostics in.
    pub fn record(&mut self, diagnostics: &StageDiagnostics) {
        let key = diagnostics
            .intent
            .map(|i| i.as_str())
            .unwrap_or(UNKNOWN_INTENT)
            .to_string();
        *self.queries_by_intent.entry(key.clone()).or_default() += 1;
        if diagnostics.accepted_results > 0 {
            *self.hits_by_intent.entry(key).or_default() += 1;
        }

        self.total_tokens_used += diagnostics.tokens_used as u64;
        self.total_tokens_budgeted += diagnostics.token_budget as u64;
        self.total_vector_hits += diagnostics.vector_hits as u64;
        self.total_graph_results += diagnostics.graph_results as u64;
        self.total_hydrated_nodes += diagnostics.hydrated_nodes as u64;

        for (stage, outcome) in [
            ("understanding", diagnostics.understanding),
            ("vector", diagnostics.vector),
            ("graph", diagnostics.graph),
        ] {
            if outcome == StageOutcome::Degraded {
                *self.degraded_stages.entry(stage.to_string()).or_default() += 1;
            }
        }
        if diagnostics.graph == StageOutcome::Skipped {
            self.graph_skipped += 1;
        }
    }

    pub fn total_queries(&self) -> u64 {
        self.queries_by_intent.values().sum()
    }

    /// Share of queries for an intent that produced any context.
    pub fn hit_rate(&self, intent: Intent) -> f64 {
        let queries = self.queries_by_intent.get(intent.as_str()).copied().unwrap_or(0);
        if queries == 0 {
            return 0.0;
        }
        let hits = self.hits_by_intent.get(intent.as_str()).copied().unwrap_or(0);
        hits as f64 / queries as f64
    }

    /// Tokens used / tokens budgeted.
    pub fn token_efficiency(&self) -> f64 {
        if self.total_tokens_budgeted == 0 {
            return 0.0;
        }
        self.total_tokens_used as f64 / self.total_tokens_budgeted as f64
    }

    pub fn degraded_count(&self, stage: &str) -> u64 {
        self.degraded_stages.get(stage).copied().unwrap_or(0)
    }
}
