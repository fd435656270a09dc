use crate::models::ExtractedEntities;

/// Strategy for pulling structured entities out of a query. Best effort.
pub trait IEntityExtractor: Send + Sync {
    fn extract(&self, query: &str) -> ExtractedEntities;
}
