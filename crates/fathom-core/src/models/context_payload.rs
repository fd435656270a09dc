use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::merged::MergedResult;

/// Source metadata needed to render a human-checkable citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub document_name: String,
    pub document_id: String,
    pub page_numbers: Vec<u32>,
    pub section_type: Option<String>,
    pub relationship_path: Option<Vec<String>>,
}

/// Token-budgeted context handed to answer generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextPayload {
    /// Results included verbatim, in acceptance order.
    pub full_text: Vec<MergedResult>,
    /// Results included as summaries, in acceptance order.
    pub summaries: Vec<MergedResult>,
    /// Number of merged candidates considered.
    pub total_candidates: usize,
    /// Tokens consumed by accepted entries, overhead included.
    pub total_tokens: usize,
    /// Citation label → source metadata.
    pub provenance: BTreeMap<String, ProvenanceEntry>,
}

impl ContextPayload {
    pub fn result_count(&self) -> usize {
        self.full_text.len() + self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result_count() == 0
    }

    /// All accepted results, full text first.
    pub fn results(&self) -> impl Iterator<Item = &MergedResult> {
        self.full_text.iter().chain(self.summaries.iter())
    }
}
