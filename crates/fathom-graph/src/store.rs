//! `IGraphStore` over an in-process [`PropertyGraph`].

use fathom_core::errors::FathomResult;
use fathom_core::models::{GraphQuery, GraphRecord, QueryShape};
use fathom_core::traits::IGraphStore;
use tracing::debug;

use crate::graph::{GraphSnapshot, PropertyGraph};
use crate::records::{expansion_record, node_record};
use crate::traversal::expand;

/// Read-only graph store answering queries by their structured shape.
/// The Cypher text is ignored.
pub struct InMemoryGraphStore {
    graph: PropertyGraph,
}

impl InMemoryGraphStore {
    pub fn new(graph: PropertyGraph) -> Self {
        Self { graph }
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> FathomResult<Self> {
        Ok(Self::new(PropertyGraph::from_snapshot(snapshot)?))
    }

    pub fn graph(&self) -> &PropertyGraph {
        &self.graph
    }
}

impl IGraphStore for InMemoryGraphStore {
    fn run_query(&self, query: &GraphQuery) -> FathomResult<Vec<GraphRecord>> {
        let records: Vec<GraphRecord> = match &query.shape {
            QueryShape::NodeLookup {
                workflow_id,
                entity_ids,
            } => entity_ids
                .iter()
                .flat_map(|id| self.graph.nodes_for_entity(workflow_id, id))
                .filter_map(|&idx| self.graph.node(idx))
                .map(node_record)
                .collect(),
            QueryShape::Expand {
                workflow_id,
                seed_node_ids,
                max_depth,
                edge_types,
                limit,
            } => expand(
                &self.graph,
                workflow_id,
                seed_node_ids,
                *max_depth,
                edge_types,
                *limit,
            )
            .iter()
            .filter_map(|r| self.graph.node(r.index).map(|n| expansion_record(n, r)))
            .collect(),
        };

        debug!(records = records.len(), "in-memory graph query");
        Ok(records)
    }
}
