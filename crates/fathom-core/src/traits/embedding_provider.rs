use crate::errors::FathomResult;

/// Embedding generation.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed every text in one call. Output order matches input order.
    fn embed_batch(&self, texts: &[String]) -> FathomResult<Vec<Vec<f32>>>;

    /// Vector dimensionality.
    fn dimensions(&self) -> usize;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
