//! # fathom-core
//!
//! Foundation crate for the Fathom retrieval engine.
//! Defines the per-query data model, the collaborator traits the engine is
//! wired against, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FathomConfig;
pub use errors::{FathomError, FathomResult};
pub use intent::Intent;
pub use models::{
    ContextPayload, ExtractedEntities, GraphNode, GraphTraversalResult, MergedResult, QueryPlan,
    ResultSource, VectorSearchResult,
};
