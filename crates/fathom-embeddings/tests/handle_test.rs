use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fathom_core::config::EmbeddingConfig;
use fathom_core::errors::{EmbeddingError, FathomResult};
use fathom_core::traits::IEmbeddingProvider;
use fathom_core::FathomError;
use fathom_embeddings::{EmbeddingHandle, HashingProvider};

/// Provider that counts how many texts it was asked to embed.
struct CountingProvider {
    inner: HashingProvider,
    texts_embedded: AtomicUsize,
    calls: AtomicUsize,
}

impl CountingProvider {
    fn new(dims: usize) -> Self {
        Self {
            inner: HashingProvider::new(dims),
            texts_embedded: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }
}

impl IEmbeddingProvider for CountingProvider {
    fn embed_batch(&self, texts: &[String]) -> FathomResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn config(dims: usize) -> EmbeddingConfig {
    EmbeddingConfig {
        dimensions: dims,
        ..Default::default()
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn provider_is_initialized_lazily_and_once() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = inits.clone();
    let handle = EmbeddingHandle::new(
        &config(32),
        Box::new(move || -> FathomResult<Arc<dyn IEmbeddingProvider>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(HashingProvider::new(32)))
        }),
    );
    assert!(!handle.is_initialized());
    assert_eq!(handle.name(), "uninitialized");

    std::thread::scope(|s| {
        for i in 0..8 {
            let handle = &handle;
            s.spawn(move || {
                handle.embed_batch(&[format!("query {i}")]).unwrap();
            });
        }
    });

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert!(handle.is_initialized());
    assert_eq!(handle.name(), "hashing");
}

#[test]
fn failed_init_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let handle = EmbeddingHandle::new(
        &config(16),
        Box::new(move || -> FathomResult<Arc<dyn IEmbeddingProvider>> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(EmbeddingError::InitFailed {
                    reason: "model not downloaded".into(),
                }
                .into());
            }
            Ok(Arc::new(HashingProvider::new(16)))
        }),
    );

    assert!(handle.embed_batch(&texts(&["a query"])).is_err());
    assert!(!handle.is_initialized());
    assert!(handle.embed_batch(&texts(&["a query"])).is_ok());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn cached_texts_skip_the_provider() {
    let provider = Arc::new(CountingProvider::new(24));
    let handle = EmbeddingHandle::from_provider(&config(24), provider.clone());

    let first = handle
        .embed_batch(&texts(&["property deductible", "GL limits"]))
        .unwrap();
    let second = handle
        .embed_batch(&texts(&["GL limits", "flood exclusion", "property deductible"]))
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 3);
    assert_eq!(second[0], first[1]);
    assert_eq!(second[2], first[0]);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(provider.texts_embedded.load(Ordering::SeqCst), 3);
}

#[test]
fn fully_cached_batch_makes_no_call() {
    let provider = Arc::new(CountingProvider::new(8));
    let handle = EmbeddingHandle::from_provider(&config(8), provider.clone());
    handle.embed_batch(&texts(&["umbrella"])).unwrap();
    handle.embed_batch(&texts(&["umbrella"])).unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn dimension_mismatch_is_rejected() {
    let handle = EmbeddingHandle::from_provider(&config(384), Arc::new(HashingProvider::new(12)));
    let err = handle.embed_batch(&texts(&["cyber"])).unwrap_err();
    assert!(matches!(
        err,
        FathomError::EmbeddingError(EmbeddingError::DimensionMismatch {
            expected: 384,
            actual: 12
        })
    ));
}

#[test]
fn empty_batch_is_empty() {
    let handle = EmbeddingHandle::hashing(&config(16));
    assert!(handle.embed_batch(&[]).unwrap().is_empty());
    assert!(!handle.is_initialized());
}
