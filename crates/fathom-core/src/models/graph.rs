use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node property bag. Values are JSON scalars (or small arrays).
pub type PropertyMap = BTreeMap<String, Value>;

/// One row returned by the graph store.
pub type GraphRecord = BTreeMap<String, Value>;

/// A graph node resolved from a vector hit's entity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub node_id: String,
    pub entity_id: String,
    pub entity_type: String,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
    pub workflow_id: String,
}

/// A node reached by traversal from one or more seed nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphTraversalResult {
    pub node_id: String,
    pub entity_id: String,
    pub canonical_entity_id: Option<String>,
    pub entity_type: String,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
    /// Path length from the nearest seed.
    pub distance: usize,
    /// Relationship types along the path, seed side first.
    pub relationship_path: Vec<String>,
    pub relevance_score: f64,
    pub document_id: Option<String>,
    pub section_type: Option<String>,
}

impl GraphTraversalResult {
    /// String value of a property, if present and non-empty.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        match self.properties.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Structured description of a graph query. Remote stores execute the
/// Cypher text with its parameters; in-process stores execute the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryShape {
    /// Resolve nodes by entity id within a workflow.
    NodeLookup {
        workflow_id: String,
        entity_ids: Vec<String>,
    },
    /// Variable-length expansion `1..=max_depth` from seed nodes.
    Expand {
        workflow_id: String,
        seed_node_ids: Vec<String>,
        max_depth: usize,
        /// Empty means any relationship type.
        edge_types: Vec<String>,
        limit: usize,
    },
}

/// A Cypher-like query plus the structured shape it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQuery {
    pub cypher: String,
    pub params: BTreeMap<String, Value>,
    pub shape: QueryShape,
}
