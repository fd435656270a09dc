use crate::errors::FathomResult;
use crate::models::{VectorCandidate, VectorQuery};

/// Nearest-neighbour search over section/entity embeddings.
pub trait IVectorStore: Send + Sync {
    /// Search with several query embeddings at once.
    ///
    /// Returns `(candidate, distance)` pairs; distance is nominally in [0, 1].
    /// Each candidate appears at most once, at its best distance.
    fn search_multi_query(&self, query: &VectorQuery) -> FathomResult<Vec<(VectorCandidate, f64)>>;
}
