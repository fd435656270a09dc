//! Cross-source fusion of vector and graph results.
//!
//! Results are keyed by `(document_id, entity_id)`. Vector results go in
//! first; graph results either fuse into an existing entry or become new
//! graph-only entries.

pub mod synthesis;

use std::collections::HashMap;

use fathom_core::config::MergeConfig;
use fathom_core::models::{GraphTraversalResult, MergedResult, ResultSource, VectorSearchResult};
use tracing::debug;

pub struct ResultMerger {
    same_entity_boost: f64,
}

impl ResultMerger {
    pub fn new(config: &MergeConfig) -> Self {
        Self {
            same_entity_boost: config.same_entity_boost,
        }
    }

    /// Fuse both result lists into one set, unique per key, sorted by score
    /// descending with ties broken by key.
    pub fn merge(
        &self,
        vector: &[VectorSearchResult],
        graph: &[GraphTraversalResult],
    ) -> Vec<MergedResult> {
        let mut merged: Vec<MergedResult> = Vec::with_capacity(vector.len() + graph.len());
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut document_names: HashMap<&str, &str> = HashMap::new();

        for hit in vector {
            if !hit.document_name.is_empty() {
                document_names.insert(&hit.document_id, &hit.document_name);
            }
            let entry = from_vector(hit);
            let key = (entry.document_id.clone(), entry.entity_id.clone());
            match index.get(&key) {
                Some(&i) => {
                    if entry.score > merged[i].score {
                        merged[i] = entry;
                    }
                }
                None => {
                    index.insert(key, merged.len());
                    merged.push(entry);
                }
            }
        }

        let mut fused = 0usize;
        let mut dropped = 0usize;
        for result in graph {
            let Some(document_id) = result.document_id.as_deref().filter(|d| !d.is_empty()) else {
                dropped += 1;
                continue;
            };
            let key = (document_id.to_string(), result.entity_id.clone());
            match index.get(&key) {
                Some(&i) => {
                    if merged[i].source != ResultSource::Graph {
                        fused += 1;
                    }
                    self.fold_graph(&mut merged[i], result);
                }
                None => {
                    let name = document_names.get(document_id).copied().unwrap_or(document_id);
                    index.insert(key, merged.len());
                    merged.push(from_graph(result, document_id, name));
                }
            }
        }

        merged.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document_id.cmp(&b.document_id))
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });

        debug!(
            vector = vector.len(),
            graph = graph.len(),
            merged = merged.len(),
            fused,
            dropped,
            "results merged"
        );
        merged
    }

    fn fold_graph(&self, entry: &mut MergedResult, result: &GraphTraversalResult) {
        let incoming = result.relevance_score;
        let improves = entry.graph_score.map_or(true, |g| incoming > g);
        if improves {
            entry.graph_score = Some(incoming);
            entry.distance = Some(result.distance);
            entry.relationship_path = Some(result.relationship_path.clone());
        }
        if entry.canonical_entity_id.is_none() {
            entry.canonical_entity_id = result.canonical_entity_id.clone();
        }
        if entry.section_type.is_none() {
            entry.section_type = result.section_type.clone();
        }

        match entry.vector_score {
            Some(vector_score) => {
                entry.source = ResultSource::Both;
                let graph_score = entry.graph_score.unwrap_or(incoming);
                entry.score = vector_score.max(graph_score) + self.same_entity_boost;
            }
            None => {
                entry.score = entry.score.max(incoming);
            }
        }
    }
}

fn from_vector(hit: &VectorSearchResult) -> MergedResult {
    let entity_id = if hit.entity_id.is_empty() {
        hit.embedding_id.clone()
    } else {
        hit.entity_id.clone()
    };
    MergedResult {
        source: ResultSource::Vector,
        content: hit.content.clone(),
        summary: None,
        entity_id,
        canonical_entity_id: hit.canonical_entity_id.clone(),
        entity_type: hit.entity_type.clone(),
        section_type: Some(hit.section_type.clone()).filter(|s| !s.is_empty()),
        score: hit.final_score,
        vector_score: Some(hit.final_score),
        graph_score: None,
        distance: None,
        document_id: hit.document_id.clone(),
        document_name: if hit.document_name.is_empty() {
            hit.document_id.clone()
        } else {
            hit.document_name.clone()
        },
        page_numbers: hit.page_numbers.clone(),
        relationship_path: None,
        citation: None,
    }
}

fn from_graph(result: &GraphTraversalResult, document_id: &str, document_name: &str) -> MergedResult {
    MergedResult {
        source: ResultSource::Graph,
        content: synthesis::synthesize_content(result),
        summary: None,
        entity_id: result.entity_id.clone(),
        canonical_entity_id: result.canonical_entity_id.clone(),
        entity_type: result.entity_type.clone(),
        section_type: result.section_type.clone(),
        score: result.relevance_score,
        vector_score: None,
        graph_score: Some(result.relevance_score),
        distance: Some(result.distance),
        document_id: document_id.to_string(),
        document_name: document_name.to_string(),
        page_numbers: synthesis::pages_from_properties(result),
        relationship_path: Some(result.relationship_path.clone()),
        citation: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vector_hit(doc: &str, entity: &str, score: f64) -> VectorSearchResult {
        VectorSearchResult {
            embedding_id: format!("emb-{entity}"),
            document_id: doc.into(),
            entity_id: entity.into(),
            canonical_entity_id: None,
            content: format!("content of {entity}"),
            section_type: "coverages".into(),
            entity_type: "coverage".into(),
            similarity: score,
            final_score: score,
            document_name: "Policy.pdf".into(),
            page_numbers: vec![2],
            recency_date: None,
        }
    }

    fn graph_hit(doc: Option<&str>, entity: &str, score: f64) -> GraphTraversalResult {
        GraphTraversalResult {
            node_id: format!("n-{entity}"),
            entity_id: entity.into(),
            canonical_entity_id: Some(format!("canon-{entity}")),
            entity_type: "coverage".into(),
            labels: vec![],
            properties: serde_json::from_value(json!({"name": entity})).unwrap(),
            distance: 1,
            relationship_path: vec!["HAS_COVERAGE".into()],
            relevance_score: score,
            document_id: doc.map(str::to_string),
            section_type: Some("coverages".into()),
        }
    }

    fn merger() -> ResultMerger {
        ResultMerger::new(&MergeConfig::default())
    }

    #[test]
    fn collision_becomes_both_with_boost() {
        let merged = merger().merge(
            &[vector_hit("doc-1", "e1", 0.8)],
            &[graph_hit(Some("doc-1"), "e1", 0.9)],
        );
        assert_eq!(merged.len(), 1);
        let entry = &merged[0];
        assert_eq!(entry.source, ResultSource::Both);
        assert!((entry.score - 1.0).abs() < 1e-9);
        assert_eq!(entry.distance, Some(1));
        assert_eq!(entry.canonical_entity_id.as_deref(), Some("canon-e1"));
        assert_eq!(entry.content, "content of e1");
    }

    #[test]
    fn graph_only_without_document_is_dropped() {
        let merged = merger().merge(&[], &[graph_hit(None, "e1", 0.9), graph_hit(Some("doc-2"), "e2", 0.5)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, ResultSource::Graph);
        assert_eq!(merged[0].document_name, "doc-2");
        assert_eq!(merged[0].content, "Name: e2");
    }

    #[test]
    fn graph_only_picks_up_document_name_from_vector_hits() {
        let merged = merger().merge(
            &[vector_hit("doc-1", "e1", 0.8)],
            &[graph_hit(Some("doc-1"), "e2", 0.5)],
        );
        assert_eq!(merged[1].document_name, "Policy.pdf");
    }

    #[test]
    fn same_entity_in_two_documents_stays_separate() {
        let merged = merger().merge(
            &[vector_hit("doc-1", "e1", 0.8), vector_hit("doc-2", "e1", 0.7)],
            &[],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn ties_break_on_key() {
        let merged = merger().merge(
            &[vector_hit("doc-2", "a", 0.5), vector_hit("doc-1", "b", 0.5)],
            &[],
        );
        assert_eq!(merged[0].document_id, "doc-1");
    }
}
