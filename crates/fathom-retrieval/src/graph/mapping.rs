//! Vector hit → graph node mapping.

use std::collections::HashSet;

use fathom_core::errors::FathomResult;
use fathom_core::models::{GraphNode, VectorSearchResult};
use fathom_core::traits::IGraphStore;
use tracing::{debug, warn};

use super::cypher;
use super::records::parse_node;

/// Entity ids of the hits, empty ones skipped, first occurrence order.
pub fn seed_entity_ids(results: &[VectorSearchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .map(|r| r.entity_id.as_str())
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// One lookup for every hit's entity id. Malformed rows are skipped.
pub fn map_nodes(
    store: &dyn IGraphStore,
    workflow_id: &str,
    results: &[VectorSearchResult],
) -> FathomResult<Vec<GraphNode>> {
    let entity_ids = seed_entity_ids(results);
    if entity_ids.is_empty() {
        return Ok(Vec::new());
    }

    let records = store.run_query(&cypher::node_lookup(workflow_id, &entity_ids))?;
    let mut seen = HashSet::new();
    let nodes: Vec<GraphNode> = records
        .iter()
        .filter_map(|record| match parse_node(record) {
            Ok(node) => Some(node),
            Err(e) => {
                warn!(error = %e, "skipping malformed node record");
                None
            }
        })
        .filter(|node| seen.insert(node.node_id.clone()))
        .collect();

    debug!(entity_ids = entity_ids.len(), nodes = nodes.len(), "mapped vector hits to graph nodes");
    Ok(nodes)
}
