use std::collections::HashSet;
use std::sync::OnceLock;

use fathom_core::config::{ContextConfig, MergeConfig};
use fathom_core::models::{GraphTraversalResult, MergedResult, ResultSource, VectorSearchResult};
use fathom_retrieval::vector::reranker::similarity;
use fathom_retrieval::{ContextBuilder, ResultMerger};
use fathom_tokens::TokenCounter;
use proptest::prelude::*;

fn counter() -> TokenCounter {
    static COUNTER: OnceLock<TokenCounter> = OnceLock::new();
    COUNTER
        .get_or_init(|| TokenCounter::with_default_cache().unwrap())
        .clone()
}

fn vector_hit(doc: usize, entity: usize, score: f64) -> VectorSearchResult {
    VectorSearchResult {
        embedding_id: format!("emb-{doc}-{entity}-{score}"),
        document_id: format!("doc-{doc}"),
        entity_id: format!("e{entity}"),
        canonical_entity_id: None,
        content: format!("content for entity {entity}"),
        section_type: "coverages".to_string(),
        entity_type: "coverage".to_string(),
        similarity: score,
        final_score: score,
        document_name: format!("Policy {doc}.pdf"),
        page_numbers: vec![1],
        recency_date: None,
    }
}

fn graph_hit(doc: Option<usize>, entity: usize, score: f64, distance: usize) -> GraphTraversalResult {
    GraphTraversalResult {
        node_id: format!("n{entity}"),
        entity_id: format!("e{entity}"),
        canonical_entity_id: None,
        entity_type: "exclusion".to_string(),
        labels: Vec::new(),
        properties: Default::default(),
        distance,
        relationship_path: vec!["HAS_EXCLUSION".to_string(); distance],
        relevance_score: score,
        document_id: doc.map(|d| format!("doc-{d}")),
        section_type: Some("exclusions".to_string()),
    }
}

fn merged_entry(i: usize, words: usize, score: f64) -> MergedResult {
    MergedResult {
        source: ResultSource::Vector,
        content: "coverage limit applies per occurrence ".repeat(words),
        summary: None,
        entity_id: format!("e{i}"),
        canonical_entity_id: None,
        entity_type: "coverage".to_string(),
        section_type: Some("coverages".to_string()),
        score,
        vector_score: Some(score),
        graph_score: None,
        distance: None,
        document_id: "doc-1".to_string(),
        document_name: "Policy.pdf".to_string(),
        page_numbers: vec![i as u32 + 1],
        relationship_path: None,
        citation: None,
    }
}

fn arb_vector() -> impl Strategy<Value = Vec<VectorSearchResult>> {
    prop::collection::vec((0usize..2, 0usize..6, 0.0f64..1.5), 0..12)
        .prop_map(|hits| hits.into_iter().map(|(d, e, s)| vector_hit(d, e, s)).collect())
}

fn arb_graph() -> impl Strategy<Value = Vec<GraphTraversalResult>> {
    prop::collection::vec(
        (prop::option::weighted(0.9, 0usize..2), 0usize..6, 0.0f64..1.2, 1usize..4),
        0..12,
    )
    .prop_map(|hits| {
        hits.into_iter()
            .map(|(d, e, s, dist)| graph_hit(d, e, s, dist))
            .collect()
    })
}

fn arb_merged() -> impl Strategy<Value = Vec<MergedResult>> {
    prop::collection::vec((0usize..60, 0.0f64..2.0), 0..15).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (words, score))| merged_entry(i, words, score))
            .collect()
    })
}

proptest! {
    #[test]
    fn merge_keys_are_unique(vector in arb_vector(), graph in arb_graph()) {
        let merged = ResultMerger::new(&MergeConfig::default()).merge(&vector, &graph);
        let mut keys = HashSet::new();
        for result in &merged {
            prop_assert!(keys.insert((result.document_id.clone(), result.entity_id.clone())));
        }
    }

    #[test]
    fn merge_drops_graph_results_without_document(graph in arb_graph()) {
        let merged = ResultMerger::new(&MergeConfig::default()).merge(&[], &graph);
        let documented: HashSet<_> = graph
            .iter()
            .filter_map(|g| g.document_id.clone().map(|d| (d, g.entity_id.clone())))
            .collect();
        prop_assert_eq!(merged.len(), documented.len());
    }

    #[test]
    fn merge_is_sorted_by_score(vector in arb_vector(), graph in arb_graph()) {
        let merged = ResultMerger::new(&MergeConfig::default()).merge(&vector, &graph);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn fused_score_takes_max_plus_boost(vector in arb_vector(), graph in arb_graph()) {
        let config = MergeConfig::default();
        let merged = ResultMerger::new(&config).merge(&vector, &graph);
        for result in merged.iter().filter(|r| r.source == ResultSource::Both) {
            let v = result.vector_score.unwrap();
            let g = result.graph_score.unwrap();
            prop_assert!((result.score - (v.max(g) + config.same_entity_boost)).abs() < 1e-9);
        }
    }

    #[test]
    fn context_stays_within_margin(merged in arb_merged(), max_tokens in 0usize..2_000, top_n in 0usize..6) {
        let config = ContextConfig::default();
        let builder = ContextBuilder::new(counter(), config.clone());
        let payload = builder.build(&merged, max_tokens, top_n);
        prop_assert!(payload.total_tokens <= config.effective_limit(max_tokens));
        prop_assert!(payload.full_text.len() <= top_n);
        prop_assert_eq!(payload.total_candidates, merged.len());
    }

    #[test]
    fn labels_are_sequential_with_provenance(merged in arb_merged(), max_tokens in 0usize..2_000) {
        let builder = ContextBuilder::new(counter(), ContextConfig::default());
        let payload = builder.build(&merged, max_tokens, 3);
        let mut labels: Vec<usize> = payload
            .results()
            .map(|r| {
                let citation = r.citation.as_deref().unwrap();
                citation.trim_matches(['[', ']']).parse().unwrap()
            })
            .collect();
        labels.sort_unstable();
        let expected: Vec<usize> = (1..=payload.result_count()).collect();
        prop_assert_eq!(labels, expected);
        prop_assert_eq!(payload.provenance.len(), payload.result_count());
    }

    #[test]
    fn context_build_is_idempotent(merged in arb_merged(), max_tokens in 0usize..2_000) {
        let builder = ContextBuilder::new(counter(), ContextConfig::default());
        prop_assert_eq!(builder.build(&merged, max_tokens, 2), builder.build(&merged, max_tokens, 2));
    }

    #[test]
    fn similarity_is_clamped(distance in prop::num::f64::ANY) {
        let s = similarity(distance);
        prop_assert!((0.0..=1.0).contains(&s));
    }
}
