use std::collections::HashMap;

use crate::errors::FathomResult;

/// Document metadata lookups.
pub trait IDocumentStore: Send + Sync {
    /// Display names by document id. Unknown ids are simply absent.
    fn resolve_names(&self, document_ids: &[String]) -> FathomResult<HashMap<String, String>>;

    /// Ids of every document in a workflow.
    fn list_documents(&self, workflow_id: &str) -> FathomResult<Vec<String>>;
}
