use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row stored alongside an embedding in the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorCandidate {
    pub embedding_id: String,
    pub document_id: String,
    /// Stable per-section-item identifier, e.g. `doc-1_coverages_2`.
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub canonical_entity_id: Option<String>,
    /// Text that was embedded.
    #[serde(default)]
    pub content: String,
    pub section_type: String,
    pub entity_type: String,
    /// Effective/recency date as stored; parsed leniently at rerank time.
    #[serde(default)]
    pub effective_date: Option<String>,
}

/// One multi-query nearest-neighbour request.
///
/// `None` filters mean "no filter". An empty `Some(vec![])` is never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorQuery {
    pub embeddings: Vec<Vec<f32>>,
    pub workflow_id: String,
    pub document_ids: Option<Vec<String>>,
    pub section_types: Option<Vec<String>>,
    pub entity_types: Option<Vec<String>>,
    pub top_k: usize,
}

/// A reranked, content-resolved vector hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchResult {
    pub embedding_id: String,
    pub document_id: String,
    pub entity_id: String,
    pub canonical_entity_id: Option<String>,
    pub content: String,
    pub section_type: String,
    pub entity_type: String,
    /// `1 - distance`, clamped to [0, 1].
    pub similarity: f64,
    /// Similarity plus intent, entity and recency boosts.
    pub final_score: f64,
    pub document_name: String,
    pub page_numbers: Vec<u32>,
    pub recency_date: Option<NaiveDate>,
}
