//! # fathom-embeddings
//!
//! Query embedding for the retrieval engine.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingHandle (implements IEmbeddingProvider)
//! ├── OnceCell<provider>   initialized on first use, shared thereafter
//! ├── EmbeddingCache       L1 moka, blake3 content keys
//! └── dimension check      every vector must match the configured width
//!
//! HashingProvider          deterministic, dependency-free fallback
//! ```

pub mod cache;
pub mod handle;
pub mod providers;

pub use cache::EmbeddingCache;
pub use handle::{EmbeddingHandle, ProviderFactory};
pub use providers::HashingProvider;
