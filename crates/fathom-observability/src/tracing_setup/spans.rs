//! Span definitions for the retrieval pipeline.

/// Span around one context assembly request.
#[macro_export]
macro_rules! assemble_span {
    ($request_id:expr, $workflow_id:expr) => {
        tracing::info_span!(
            "fathom.assemble",
            request_id = %$request_id,
            workflow_id = %$workflow_id
        )
    };
}

/// Span around one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr) => {
        tracing::debug_span!("fathom.stage", stage = %$stage)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ASSEMBLE: &str = "fathom.assemble";
    pub const STAGE: &str = "fathom.stage";
}

/// Pipeline stage names used in spans, events and cancellation errors.
pub mod stages {
    pub const UNDERSTANDING: &str = "understanding";
    pub const VECTOR: &str = "vector";
    pub const GRAPH: &str = "graph";
    pub const MERGE: &str = "merge";
    pub const CONTEXT: &str = "context";
}
