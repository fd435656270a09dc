use serde::{Deserialize, Serialize};

/// Which retrieval path produced a merged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Vector,
    Graph,
    Both,
}

/// A single fused result, unique per `(document_id, entity_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedResult {
    pub source: ResultSource,
    pub content: String,
    /// Short form used when the result is included as a summary.
    pub summary: Option<String>,
    pub entity_id: String,
    pub canonical_entity_id: Option<String>,
    pub entity_type: String,
    pub section_type: Option<String>,
    pub score: f64,
    /// Score contributed by the vector path, if any.
    pub vector_score: Option<f64>,
    /// Best score contributed by the graph path, if any.
    pub graph_score: Option<f64>,
    pub distance: Option<usize>,
    pub document_id: String,
    pub document_name: String,
    pub page_numbers: Vec<u32>,
    pub relationship_path: Option<Vec<String>>,
    /// Assigned by the context builder, e.g. `[3]`.
    pub citation: Option<String>,
}

impl MergedResult {
    /// Deduplication key.
    pub fn key(&self) -> (&str, &str) {
        (&self.document_id, &self.entity_id)
    }
}
