//! Intent-adaptive graph traversal.

use std::collections::HashMap;

use fathom_core::errors::FathomResult;
use fathom_core::intent::Intent;
use fathom_core::models::{GraphNode, GraphTraversalResult, QueryPlan};
use fathom_core::traits::IGraphStore;
use tracing::{debug, warn};

use super::cypher;
use super::records::parse_traversal;

const QA_EDGES: &[&str] = &["HAS_COVERAGE", "HAS_DEDUCTIBLE", "HAS_LIMIT", "APPLIES_TO"];

const ANALYSIS_EDGES: &[&str] = &[
    "HAS_COVERAGE",
    "HAS_EXCLUSION",
    "HAS_ENDORSEMENT",
    "MODIFIES",
    "EXCLUDES",
    "HAS_CONDITION",
    "HAS_LIMIT",
    "HAS_DEDUCTIBLE",
    "APPLIES_TO",
    "SAME_AS",
];

/// Traversal bounds for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    pub max_depth: usize,
    /// Empty means any relationship type.
    pub allowed_edge_types: Vec<String>,
    pub max_nodes: usize,
}

impl TraversalConfig {
    pub fn for_intent(intent: Intent) -> Self {
        Self::bounded(intent, intent.traversal_depth())
    }

    /// Bounds for a plan: edge allow-list and node cap from its intent,
    /// depth from the plan itself.
    pub fn for_plan(plan: &QueryPlan) -> Self {
        Self::bounded(plan.intent(), plan.traversal_depth())
    }

    fn bounded(intent: Intent, max_depth: usize) -> Self {
        let (edges, max_nodes): (&[&str], usize) = match intent {
            Intent::Qa => (QA_EDGES, 20),
            Intent::Analysis => (ANALYSIS_EDGES, 50),
            Intent::Audit => (&[], 100),
        };
        Self {
            max_depth,
            allowed_edge_types: edges.iter().map(|e| e.to_string()).collect(),
            max_nodes,
        }
    }
}

/// Keep records within `1..=max_depth`, one per node at its minimum
/// distance. Nearest nodes win the `max_nodes` cap; equal distances keep
/// first-seen order.
pub fn collect_within_bounds(
    rows: impl IntoIterator<Item = GraphTraversalResult>,
    config: &TraversalConfig,
) -> Vec<GraphTraversalResult> {
    let mut out: Vec<GraphTraversalResult> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ignored = 0usize;

    for row in rows {
        if row.distance < 1 || row.distance > config.max_depth {
            ignored += 1;
            continue;
        }
        match index.get(&row.node_id) {
            Some(&i) => {
                if row.distance < out[i].distance {
                    out[i] = row;
                }
            }
            None => {
                index.insert(row.node_id.clone(), out.len());
                out.push(row);
            }
        }
    }

    out.sort_by_key(|r| r.distance);
    let capped = out.len().saturating_sub(config.max_nodes);
    out.truncate(config.max_nodes);

    if ignored > 0 || capped > 0 {
        debug!(ignored, capped, max_depth = config.max_depth, "traversal rows outside bounds");
    }
    out
}

/// Expand from the mapped seed nodes.
pub fn traverse(
    store: &dyn IGraphStore,
    workflow_id: &str,
    seeds: &[GraphNode],
    config: &TraversalConfig,
) -> FathomResult<Vec<GraphTraversalResult>> {
    if seeds.is_empty() || config.max_depth == 0 || config.max_nodes == 0 {
        return Ok(Vec::new());
    }
    let seed_ids: Vec<String> = seeds.iter().map(|n| n.node_id.clone()).collect();
    let records = store.run_query(&cypher::expansion(workflow_id, &seed_ids, config))?;

    let rows = records.iter().filter_map(|record| match parse_traversal(record) {
        Ok(row) => Some(row),
        Err(e) => {
            warn!(error = %e, "skipping malformed traversal record");
            None
        }
    });
    let results = collect_within_bounds(rows, config);

    debug!(
        seeds = seed_ids.len(),
        records = records.len(),
        results = results.len(),
        max_depth = config.max_depth,
        "graph traversal"
    );
    Ok(results)
}
