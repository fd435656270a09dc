use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector retrieval and reranking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Nearest neighbours requested from the vector store.
    pub top_k: usize,
    /// Boost for hits whose entity type is in the plan's entity filters.
    pub entity_boost: f64,
    /// Recency boost at age zero.
    pub recency_max_boost: f64,
    /// Age in days at which the recency boost reaches zero.
    pub recency_window_days: i64,
    /// Upper bound on expanded query variants, original included.
    pub max_query_variants: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            entity_boost: defaults::DEFAULT_ENTITY_BOOST,
            recency_max_boost: defaults::DEFAULT_RECENCY_MAX_BOOST,
            recency_window_days: defaults::DEFAULT_RECENCY_WINDOW_DAYS,
            max_query_variants: defaults::DEFAULT_MAX_QUERY_VARIANTS,
        }
    }
}
