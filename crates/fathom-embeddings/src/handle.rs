//! Process-lifetime embedding handle.
//!
//! The underlying provider is built on first use by a caller-supplied
//! factory and shared by every query afterwards. Initialization happens at
//! most once even under concurrent first calls; a failed initialization is
//! not cached, so the next call retries the factory.

use std::sync::Arc;

use fathom_core::config::EmbeddingConfig;
use fathom_core::errors::{EmbeddingError, FathomResult};
use fathom_core::traits::IEmbeddingProvider;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::providers::HashingProvider;

/// Builds the provider on first use.
pub type ProviderFactory =
    Box<dyn Fn() -> FathomResult<Arc<dyn IEmbeddingProvider>> + Send + Sync>;

pub struct EmbeddingHandle {
    provider: OnceCell<Arc<dyn IEmbeddingProvider>>,
    factory: ProviderFactory,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingHandle {
    pub fn new(config: &EmbeddingConfig, factory: ProviderFactory) -> Self {
        Self {
            provider: OnceCell::new(),
            factory,
            cache: EmbeddingCache::new(config.cache_size),
            dimensions: config.dimensions,
        }
    }

    /// Handle backed by [`HashingProvider`] at the configured width.
    pub fn hashing(config: &EmbeddingConfig) -> Self {
        let dims = config.dimensions;
        Self::new(
            config,
            Box::new(move || -> FathomResult<Arc<dyn IEmbeddingProvider>> {
                Ok(Arc::new(HashingProvider::new(dims)))
            }),
        )
    }

    /// Handle around an already constructed provider.
    pub fn from_provider(config: &EmbeddingConfig, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        let handle = Self::new(
            config,
            Box::new(|| -> FathomResult<Arc<dyn IEmbeddingProvider>> {
                Err(EmbeddingError::ProviderUnavailable {
                    provider: "preset".to_string(),
                }
                .into())
            }),
        );
        let _ = handle.provider.set(provider);
        handle
    }

    /// The shared provider, initializing it if needed.
    pub fn provider(&self) -> FathomResult<&Arc<dyn IEmbeddingProvider>> {
        self.provider.get_or_try_init(|| {
            let provider = (self.factory)()?;
            info!(
                provider = provider.name(),
                dims = provider.dimensions(),
                "embedding provider initialized"
            );
            Ok(provider)
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.provider.get().is_some()
    }

    fn validate(&self, embedding: &[f32]) -> FathomResult<()> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingHandle {
    /// Cached texts are served from L1; the rest go to the provider in a
    /// single batch call.
    fn embed_batch(&self, texts: &[String]) -> FathomResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| EmbeddingCache::key_for(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let misses: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        debug!(
            requested = texts.len(),
            cache_hits = texts.len() - misses.len(),
            "embedding batch"
        );

        if !misses.is_empty() {
            let provider = self.provider()?;
            let batch: Vec<String> = misses.iter().map(|&i| texts[i].clone()).collect();
            let embedded = provider.embed_batch(&batch)?;
            if embedded.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!(
                        "provider returned {} vectors for {} texts",
                        embedded.len(),
                        batch.len()
                    ),
                }
                .into());
            }
            for (&i, embedding) in misses.iter().zip(embedded) {
                self.validate(&embedding)?;
                self.cache.insert(keys[i].clone(), embedding.clone());
                out[i] = Some(embedding);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider
            .get()
            .map(|p| p.name())
            .unwrap_or("uninitialized")
    }
}
