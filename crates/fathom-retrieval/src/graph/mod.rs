//! Graph expansion: map vector hits to nodes, traverse by intent, hydrate
//! sparse nodes, score.
//!
//! Each step degrades to an empty result when its store fails, so the
//! pipeline can fall back to vector-only retrieval.

pub mod cypher;
pub mod hydration;
pub mod mapping;
pub mod records;
pub mod relevance;
pub mod traversal;

use std::sync::Arc;

use fathom_core::config::GraphConfig;
use fathom_core::models::{GraphTraversalResult, QueryPlan, StageOutcome, VectorSearchResult};
use fathom_core::traits::{IExtractionStore, IGraphStore};
use tracing::{debug, warn};

use crate::scoring::Scorer;

pub use traversal::TraversalConfig;

/// Graph results plus per-step counts.
#[derive(Debug, Clone, Default)]
pub struct GraphExpansion {
    /// Scored, highest relevance first.
    pub results: Vec<GraphTraversalResult>,
    pub mapped_nodes: usize,
    pub traversed: usize,
    pub hydrated: usize,
    pub outcome: StageOutcome,
}

impl GraphExpansion {
    fn skipped() -> Self {
        Self {
            outcome: StageOutcome::Skipped,
            ..Self::default()
        }
    }

    fn degraded(mapped_nodes: usize) -> Self {
        Self {
            mapped_nodes,
            outcome: StageOutcome::Degraded,
            ..Self::default()
        }
    }
}

pub struct GraphExpander {
    store: Arc<dyn IGraphStore>,
    extraction_store: Arc<dyn IExtractionStore>,
    scorer: Scorer,
    config: GraphConfig,
}

impl GraphExpander {
    pub fn new(
        store: Arc<dyn IGraphStore>,
        extraction_store: Arc<dyn IExtractionStore>,
        scorer: Scorer,
        config: GraphConfig,
    ) -> Self {
        Self {
            store,
            extraction_store,
            scorer,
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn expand(&self, plan: &QueryPlan, vector_results: &[VectorSearchResult]) -> GraphExpansion {
        if !self.config.enabled || vector_results.is_empty() {
            return GraphExpansion::skipped();
        }

        let seeds = match mapping::map_nodes(self.store.as_ref(), plan.workflow_id(), vector_results) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(error = %e, "graph node mapping failed");
                return GraphExpansion::degraded(0);
            }
        };
        if seeds.is_empty() {
            debug!("no graph nodes for vector hits");
            return GraphExpansion::default();
        }

        let traversal_config = TraversalConfig::for_plan(plan);
        let traversed = match traversal::traverse(
            self.store.as_ref(),
            plan.workflow_id(),
            &seeds,
            &traversal_config,
        ) {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, intent = %plan.intent(), "graph traversal failed");
                return GraphExpansion::degraded(seeds.len());
            }
        };
        let traversed_count = traversed.len();

        let (hydrated, hydrated_count) = hydration::hydrate(
            self.extraction_store.as_ref(),
            traversed,
            self.config.sparse_min_properties,
        );
        let results = relevance::score_and_sort(plan, &self.scorer, &self.config, hydrated);

        debug!(
            intent = %plan.intent(),
            seeds = seeds.len(),
            traversed = traversed_count,
            hydrated = hydrated_count,
            "graph expansion"
        );

        GraphExpansion {
            results,
            mapped_nodes: seeds.len(),
            traversed: traversed_count,
            hydrated: hydrated_count,
            outcome: StageOutcome::Completed,
        }
    }
}
