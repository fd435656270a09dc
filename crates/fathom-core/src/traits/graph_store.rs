use crate::errors::FathomResult;
use crate::models::{GraphQuery, GraphRecord};

/// Read-only access to the knowledge graph.
pub trait IGraphStore: Send + Sync {
    fn run_query(&self, query: &GraphQuery) -> FathomResult<Vec<GraphRecord>>;
}
