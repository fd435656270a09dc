//! petgraph::StableGraph wrapper keyed by node id.

use std::collections::HashMap;

use fathom_core::errors::{FathomResult, GraphError};
use fathom_core::models::GraphNode;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

/// Weight on a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEdge {
    /// Relationship type, e.g. `HAS_COVERAGE`.
    pub relation: String,
}

/// Edge in a serialized snapshot, by node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Serialized form of a graph, as stored in fixtures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

pub type EntityStableGraph = StableGraph<GraphNode, RelationEdge, Directed>;

/// Graph with O(1) lookup by node id and by `(workflow, entity id)`.
#[derive(Default)]
pub struct PropertyGraph {
    pub graph: EntityStableGraph,
    node_index: HashMap<String, NodeIndex>,
    entity_index: HashMap<(String, String), Vec<NodeIndex>>,
}

impl PropertyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a snapshot. Edges naming unknown nodes are rejected.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> FathomResult<Self> {
        let mut graph = Self::new();
        for node in snapshot.nodes {
            graph.insert_node(node);
        }
        for edge in snapshot.edges {
            graph.connect(&edge.source, &edge.target, &edge.relation)?;
        }
        Ok(graph)
    }

    /// Insert a node, replacing any existing node with the same id.
    pub fn insert_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&node.node_id) {
            if let Some(slot) = self.graph.node_weight_mut(idx) {
                *slot = node;
            }
            return idx;
        }
        let key = (node.workflow_id.clone(), node.entity_id.clone());
        let node_id = node.node_id.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(node_id, idx);
        self.entity_index.entry(key).or_default().push(idx);
        idx
    }

    /// Add a typed edge between two existing nodes.
    pub fn connect(&mut self, source: &str, target: &str, relation: &str) -> FathomResult<()> {
        let (Some(src), Some(tgt)) = (self.get_node(source), self.get_node(target)) else {
            return Err(GraphError::MalformedRecord {
                field: "edge".to_string(),
                reason: format!("unknown endpoint in {source} -[{relation}]- {target}"),
            }
            .into());
        };
        self.graph.add_edge(
            src,
            tgt,
            RelationEdge {
                relation: relation.to_string(),
            },
        );
        Ok(())
    }

    pub fn get_node(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_index.get(node_id).copied()
    }

    /// Nodes carrying `entity_id` within `workflow_id`.
    pub fn nodes_for_entity(&self, workflow_id: &str, entity_id: &str) -> &[NodeIndex] {
        self.entity_index
            .get(&(workflow_id.to_string(), entity_id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
