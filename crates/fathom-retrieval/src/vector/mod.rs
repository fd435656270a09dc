//! Vector retrieval: batch embedding, one multi-query search, reranking,
//! content resolution.

pub mod content;
pub mod reranker;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fathom_core::config::RetrievalConfig;
use fathom_core::errors::FathomResult;
use fathom_core::models::{QueryPlan, VectorQuery, VectorSearchResult};
use fathom_core::traits::{IDocumentStore, IEmbeddingProvider, IExtractionStore, IVectorStore};
use tracing::{debug, warn};

use crate::scoring::Scorer;

pub use content::ContentResolver;

pub struct VectorRetriever {
    embedder: Arc<dyn IEmbeddingProvider>,
    vector_store: Arc<dyn IVectorStore>,
    resolver: ContentResolver,
    scorer: Scorer,
    top_k: usize,
    today: Option<NaiveDate>,
}

impl VectorRetriever {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        vector_store: Arc<dyn IVectorStore>,
        extraction_store: Arc<dyn IExtractionStore>,
        document_store: Arc<dyn IDocumentStore>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            resolver: ContentResolver::new(extraction_store, document_store),
            scorer: Scorer::new(config),
            top_k: config.top_k,
            today: None,
        }
    }

    /// Pin the reference date used for recency boosts.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Embed all variants in one batch call.
    pub fn embed_variants(&self, variants: &[String]) -> FathomResult<Vec<Vec<f32>>> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }
        self.embedder.embed_batch(variants)
    }

    /// Embed the plan's variants and retrieve. Failures yield an empty list.
    pub fn retrieve(&self, plan: &QueryPlan) -> Vec<VectorSearchResult> {
        match self.embed_variants(plan.variants()) {
            Ok(embeddings) => self.retrieve_with_embeddings(plan, embeddings),
            Err(e) => {
                warn!(error = %e, provider = self.embedder.name(), "query embedding failed");
                Vec::new()
            }
        }
    }

    /// Retrieve with embeddings computed elsewhere. Failures yield an empty list.
    pub fn retrieve_with_embeddings(
        &self,
        plan: &QueryPlan,
        embeddings: Vec<Vec<f32>>,
    ) -> Vec<VectorSearchResult> {
        self.try_retrieve_with_embeddings(plan, embeddings)
            .unwrap_or_else(|e| {
                warn!(error = %e, "vector search failed");
                Vec::new()
            })
    }

    /// As [`retrieve_with_embeddings`](Self::retrieve_with_embeddings), but
    /// vector store errors are returned to the caller.
    pub fn try_retrieve_with_embeddings(
        &self,
        plan: &QueryPlan,
        embeddings: Vec<Vec<f32>>,
    ) -> FathomResult<Vec<VectorSearchResult>> {
        let embeddings: Vec<Vec<f32>> = embeddings.into_iter().filter(|e| !e.is_empty()).collect();
        if embeddings.is_empty() {
            debug!("no query embeddings, skipping vector search");
            return Ok(Vec::new());
        }

        let query = VectorQuery {
            embeddings,
            workflow_id: plan.workflow_id().to_string(),
            document_ids: plan.document_filter_arg(),
            section_types: plan.section_filter_arg(),
            entity_types: plan.entity_filter_arg(),
            top_k: self.top_k,
        };
        let hits = self.vector_store.search_multi_query(&query)?;
        debug!(
            hits = hits.len(),
            queries = query.embeddings.len(),
            section_filter = ?query.section_types,
            entity_filter = ?query.entity_types,
            "vector search"
        );

        let mut results = reranker::rerank(plan, &self.scorer, hits, self.today());
        self.resolver.resolve(plan, &mut results);
        Ok(results)
    }
}
