//! Per-query data model. Everything here is created fresh for one query
//! invocation and dropped once the `ContextPayload` is handed off.

pub mod context_payload;
pub mod diagnostics;
pub mod entities;
pub mod extraction;
pub mod graph;
pub mod merged;
pub mod query_plan;
pub mod vector;

pub use context_payload::{ContextPayload, ProvenanceEntry};
pub use diagnostics::{StageDiagnostics, StageOutcome};
pub use entities::ExtractedEntities;
pub use extraction::{
    format_scalar, humanize_key, ExtractedPayload, FieldMap, PageRange, SectionRecord,
};
pub use graph::{GraphNode, GraphQuery, GraphRecord, GraphTraversalResult, PropertyMap, QueryShape};
pub use merged::{MergedResult, ResultSource};
pub use query_plan::{QueryPlan, QueryPlanBuilder, WorkflowContext};
pub use vector::{VectorCandidate, VectorQuery, VectorSearchResult};
