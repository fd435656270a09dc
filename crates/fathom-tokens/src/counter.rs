use std::sync::Arc;

use fathom_core::config::defaults::DEFAULT_TOKEN_CACHE_SIZE;
use fathom_core::{FathomError, FathomResult};
use moka::sync::Cache;
use tiktoken_rs::CoreBPE;

/// Token counter wrapping tiktoken's cl100k_base tokenizer.
/// Caches results per blake3 content hash.
#[derive(Clone)]
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    /// Create a counter with the given cache capacity.
    pub fn new(cache_capacity: u64) -> FathomResult<Self> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| FathomError::TokenizerError(format!("cl100k_base: {e}")))?;
        Ok(Self {
            bpe: Arc::new(bpe),
            cache: Cache::new(cache_capacity),
        })
    }

    /// Create a counter with the default cache capacity.
    pub fn with_default_cache() -> FathomResult<Self> {
        Self::new(DEFAULT_TOKEN_CACHE_SIZE)
    }

    /// Count tokens in the given text (uncached).
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Count tokens with blake3 content-hash caching.
    pub fn count_cached(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.cache.get_with(hash, || self.count(text))
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}
