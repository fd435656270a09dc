//! Graph query construction.
//!
//! Every query carries both Cypher text with parameters, for remote graph
//! databases, and the equivalent structured [`QueryShape`] for in-process
//! stores. Both return the column aliases in `record_keys`.

use std::collections::BTreeMap;

use fathom_core::models::{GraphQuery, QueryShape};
use serde_json::Value;

use super::traversal::TraversalConfig;

const RETURN_NODE: &str = "elementId(n) AS node_id, n.entity_id AS entity_id, \
n.entity_type AS entity_type, labels(n) AS labels, properties(n) AS properties, \
n.workflow_id AS workflow_id";

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// `-[:A|B*1..d]-`, or `-[*1..d]-` when any relationship type is allowed.
pub fn path_pattern(edge_types: &[String], max_depth: usize) -> String {
    if edge_types.is_empty() {
        format!("-[*1..{max_depth}]-")
    } else {
        format!("-[:{}*1..{max_depth}]-", edge_types.join("|"))
    }
}

/// Resolve nodes for entity ids within one workflow.
pub fn node_lookup(workflow_id: &str, entity_ids: &[String]) -> GraphQuery {
    let cypher = format!(
        "MATCH (n) WHERE n.workflow_id = $workflow_id AND n.entity_id IN $entity_ids \
RETURN {RETURN_NODE}"
    );
    let params = BTreeMap::from([
        ("workflow_id".to_string(), Value::String(workflow_id.to_string())),
        ("entity_ids".to_string(), strings(entity_ids)),
    ]);
    GraphQuery {
        cypher,
        params,
        shape: QueryShape::NodeLookup {
            workflow_id: workflow_id.to_string(),
            entity_ids: entity_ids.to_vec(),
        },
    }
}

/// Variable-length expansion from seed nodes, shortest path per node. A seed
/// is only returned when reached from another seed.
pub fn expansion(workflow_id: &str, seed_node_ids: &[String], config: &TraversalConfig) -> GraphQuery {
    let pattern = path_pattern(&config.allowed_edge_types, config.max_depth);
    let cypher = format!(
        "MATCH (seed) WHERE elementId(seed) IN $seed_node_ids \
MATCH path = (seed){pattern}(n) \
WHERE n.workflow_id = $workflow_id AND n <> seed \
WITH n, path ORDER BY length(path) ASC \
WITH n, collect(path)[0] AS path \
RETURN {RETURN_NODE}, length(path) AS distance, \
[r IN relationships(path) | type(r)] AS relationship_path \
ORDER BY distance ASC LIMIT $limit"
    );
    let params = BTreeMap::from([
        ("workflow_id".to_string(), Value::String(workflow_id.to_string())),
        ("seed_node_ids".to_string(), strings(seed_node_ids)),
        ("limit".to_string(), Value::from(config.max_nodes as u64)),
    ]);
    GraphQuery {
        cypher,
        params,
        shape: QueryShape::Expand {
            workflow_id: workflow_id.to_string(),
            seed_node_ids: seed_node_ids.to_vec(),
            max_depth: config.max_depth,
            edge_types: config.allowed_edge_types.clone(),
            limit: config.max_nodes,
        },
    }
}
