use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Expected vector dimensionality; mismatches are rejected.
    pub dimensions: usize,
    /// L1 query-embedding cache capacity (entries).
    pub cache_size: u64,
    /// Token-count cache capacity (entries).
    pub token_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
            token_cache_size: defaults::DEFAULT_TOKEN_CACHE_SIZE,
        }
    }
}
