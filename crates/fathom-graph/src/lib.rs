//! # fathom-graph
//!
//! An in-process knowledge graph over `petgraph::StableGraph` that implements
//! `IGraphStore` by executing the structured `QueryShape` carried by each
//! `GraphQuery`. Used for offline runs and tests; production deployments
//! point the engine at a remote graph database instead.

pub mod graph;
pub mod records;
pub mod store;
pub mod traversal;

pub use graph::{EdgeSpec, GraphSnapshot, PropertyGraph, RelationEdge};
pub use store::InMemoryGraphStore;
pub use traversal::{expand, Reached};
