//! # fathom-retrieval
//!
//! The retrieval and context assembly engine. Hybrid retrieval (multi-query
//! vector search + knowledge-graph expansion), intent-aware scoring,
//! cross-source fusion, and a token-budgeted context with citations.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine
//! ├── QueryUnderstanding
//! │   ├── KeywordClassifier (intent)
//! │   ├── PatternExtractor (policy numbers, coverages, names, dates, ...)
//! │   ├── Expansion (insurance abbreviations)
//! │   └── Filters (section / entity type)
//! ├── VectorRetriever
//! │   ├── Reranker (similarity + section/entity/recency boosts)
//! │   └── ContentResolver (extracted payloads, document names)
//! ├── GraphExpander
//! │   ├── Mapping (hit → node lookup)
//! │   ├── Traversal (intent-adaptive depth and edge types)
//! │   ├── Hydration (sparse nodes, parallel lookups)
//! │   └── Relevance (distance decay + boosts)
//! ├── ResultMerger (keyed fusion, graph content synthesis)
//! └── ContextBuilder
//!     ├── Summary (fallback summaries)
//!     ├── Provenance ([n] labels)
//!     └── Render
//! ```

pub mod context;
pub mod engine;
pub mod graph;
pub mod merge;
pub mod scoring;
pub mod understanding;
pub mod vector;

pub use context::ContextBuilder;
pub use engine::{Collaborators, RetrievalEngine, RetrievalOutput, RetrievalRequest};
pub use graph::GraphExpander;
pub use merge::ResultMerger;
pub use understanding::QueryUnderstanding;
pub use vector::VectorRetriever;
