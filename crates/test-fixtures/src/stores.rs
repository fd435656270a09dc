//! In-memory collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use fathom_core::errors::{EmbeddingError, FathomResult, GraphError, StoreError};
use fathom_core::models::{FieldMap, GraphQuery, GraphRecord, SectionRecord, VectorCandidate, VectorQuery};
use fathom_core::traits::{
    IDocumentStore, IEmbeddingProvider, IExtractionStore, IGraphStore, IVectorStore,
};

/// One stored embedding row.
#[derive(Debug, Clone)]
pub struct VectorRow {
    pub workflow_id: String,
    pub candidate: VectorCandidate,
    pub embedding: Vec<f32>,
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        na += f64::from(*x) * f64::from(*x);
        nb += f64::from(*y) * f64::from(*y);
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

fn allowed(filter: &Option<Vec<String>>, value: &str) -> bool {
    filter.as_ref().map_or(true, |f| f.iter().any(|v| v == value))
}

/// Brute-force cosine search. Distance is `1 - cosine`.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    rows: Vec<VectorRow>,
    calls: AtomicUsize,
}

impl InMemoryVectorStore {
    pub fn new(rows: Vec<VectorRow>) -> Self {
        Self {
            rows,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of search calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IVectorStore for InMemoryVectorStore {
    fn search_multi_query(&self, query: &VectorQuery) -> FathomResult<Vec<(VectorCandidate, f64)>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut best: Vec<(VectorCandidate, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for row in &self.rows {
            let c = &row.candidate;
            if row.workflow_id != query.workflow_id
                || !allowed(&query.document_ids, &c.document_id)
                || !allowed(&query.section_types, &c.section_type)
                || !allowed(&query.entity_types, &c.entity_type)
            {
                continue;
            }
            let distance = query
                .embeddings
                .iter()
                .map(|e| 1.0 - cosine(e, &row.embedding))
                .fold(f64::INFINITY, f64::min);
            match index.get(c.embedding_id.as_str()) {
                Some(&i) if distance < best[i].1 => best[i].1 = distance,
                Some(_) => {}
                None => {
                    index.insert(&c.embedding_id, best.len());
                    best.push((c.clone(), distance));
                }
            }
        }

        best.sort_by(|a, b| a.1.total_cmp(&b.1));
        best.truncate(query.top_k);
        Ok(best)
    }
}

/// Section records plus entity attribute sets keyed by `(entity_type, key)`.
#[derive(Debug, Default)]
pub struct InMemoryExtractionStore {
    sections: Vec<SectionRecord>,
    entities: HashMap<(String, String), FieldMap>,
    section_calls: AtomicUsize,
}

impl InMemoryExtractionStore {
    pub fn new(sections: Vec<SectionRecord>, entities: HashMap<(String, String), FieldMap>) -> Self {
        Self {
            sections,
            entities,
            section_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `get_sections` calls served.
    pub fn section_calls(&self) -> usize {
        self.section_calls.load(Ordering::SeqCst)
    }
}

impl IExtractionStore for InMemoryExtractionStore {
    fn get_sections(
        &self,
        document_id: &str,
        section_type: &str,
        workflow_id: &str,
    ) -> FathomResult<Vec<SectionRecord>> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sections
            .iter()
            .filter(|s| {
                s.document_id == document_id
                    && s.section_type == section_type
                    && s.workflow_id == workflow_id
            })
            .cloned()
            .collect())
    }

    fn get_workflow_sections(
        &self,
        workflow_id: &str,
        document_ids: &[String],
    ) -> FathomResult<Vec<SectionRecord>> {
        Ok(self
            .sections
            .iter()
            .filter(|s| s.workflow_id == workflow_id && document_ids.contains(&s.document_id))
            .cloned()
            .collect())
    }

    fn get_entity_by_key(&self, entity_type: &str, key: &str) -> FathomResult<Option<FieldMap>> {
        Ok(self
            .entities
            .get(&(entity_type.to_string(), key.to_string()))
            .cloned())
    }
}

/// `(workflow_id, document_id, name)` rows.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Vec<(String, String, String)>,
}

impl InMemoryDocumentStore {
    pub fn new(documents: Vec<(String, String, String)>) -> Self {
        Self { documents }
    }
}

impl IDocumentStore for InMemoryDocumentStore {
    fn resolve_names(&self, document_ids: &[String]) -> FathomResult<HashMap<String, String>> {
        Ok(self
            .documents
            .iter()
            .filter(|(_, id, _)| document_ids.contains(id))
            .map(|(_, id, name)| (id.clone(), name.clone()))
            .collect())
    }

    fn list_documents(&self, workflow_id: &str) -> FathomResult<Vec<String>> {
        Ok(self
            .documents
            .iter()
            .filter(|(wf, _, _)| wf == workflow_id)
            .map(|(_, id, _)| id.clone())
            .collect())
    }
}

/// Every call fails as if the backing service were down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl FailingStore {
    fn unavailable(store: &str) -> StoreError {
        StoreError::Unavailable {
            store: store.to_string(),
            reason: "connection refused".to_string(),
        }
    }
}

impl IVectorStore for FailingStore {
    fn search_multi_query(&self, _query: &VectorQuery) -> FathomResult<Vec<(VectorCandidate, f64)>> {
        Err(Self::unavailable("vector store").into())
    }
}

impl IExtractionStore for FailingStore {
    fn get_sections(&self, _: &str, _: &str, _: &str) -> FathomResult<Vec<SectionRecord>> {
        Err(Self::unavailable("extraction store").into())
    }

    fn get_workflow_sections(&self, _: &str, _: &[String]) -> FathomResult<Vec<SectionRecord>> {
        Err(Self::unavailable("extraction store").into())
    }

    fn get_entity_by_key(&self, _: &str, _: &str) -> FathomResult<Option<FieldMap>> {
        Err(Self::unavailable("extraction store").into())
    }
}

impl IDocumentStore for FailingStore {
    fn resolve_names(&self, _: &[String]) -> FathomResult<HashMap<String, String>> {
        Err(Self::unavailable("document store").into())
    }

    fn list_documents(&self, _: &str) -> FathomResult<Vec<String>> {
        Err(Self::unavailable("document store").into())
    }
}

impl IGraphStore for FailingStore {
    fn run_query(&self, _query: &GraphQuery) -> FathomResult<Vec<GraphRecord>> {
        Err(GraphError::Connection {
            reason: "connection refused".to_string(),
        }
        .into())
    }
}

/// Embedding provider that always fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingEmbedder {
    pub dimensions: usize,
}

impl IEmbeddingProvider for FailingEmbedder {
    fn embed_batch(&self, _texts: &[String]) -> FathomResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "model not loaded".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing"
    }
}
