use criterion::{criterion_group, criterion_main, Criterion};

use fathom_core::config::{ContextConfig, MergeConfig};
use fathom_core::models::{GraphTraversalResult, MergedResult, ResultSource, VectorSearchResult};
use fathom_retrieval::{ContextBuilder, ResultMerger};
use fathom_tokens::TokenCounter;

fn vector_hit(i: usize) -> VectorSearchResult {
    VectorSearchResult {
        embedding_id: format!("emb-{i}"),
        document_id: format!("doc-{}", i % 4),
        entity_id: format!("e{i}"),
        canonical_entity_id: None,
        content: format!("Coverage {i} limit $1,000,000 per occurrence, deductible $5,000."),
        section_type: "coverages".to_string(),
        entity_type: "coverage".to_string(),
        similarity: 0.8,
        final_score: 1.0 - i as f64 / 1_000.0,
        document_name: format!("Policy {}.pdf", i % 4),
        page_numbers: vec![(i % 20) as u32 + 1],
        recency_date: None,
    }
}

fn graph_hit(i: usize) -> GraphTraversalResult {
    GraphTraversalResult {
        node_id: format!("n{i}"),
        entity_id: format!("e{}", i * 2),
        canonical_entity_id: None,
        entity_type: "exclusion".to_string(),
        labels: vec!["Exclusion".to_string()],
        properties: Default::default(),
        distance: 1 + i % 3,
        relationship_path: vec!["HAS_EXCLUSION".to_string()],
        relevance_score: 0.9 - i as f64 / 1_000.0,
        document_id: Some(format!("doc-{}", (i * 2) % 4)),
        section_type: Some("exclusions".to_string()),
    }
}

/// 200 candidates with paragraph-sized content.
fn merged_candidates() -> Vec<MergedResult> {
    (0..200)
        .map(|i| MergedResult {
            source: ResultSource::Vector,
            content: format!("Section {i}. ") + &"The policy covers direct physical loss. ".repeat(12),
            summary: (i % 3 == 0).then(|| format!("Summary of section {i}")),
            entity_id: format!("e{i}"),
            canonical_entity_id: None,
            entity_type: "coverage".to_string(),
            section_type: Some("coverages".to_string()),
            score: 1.0 - i as f64 / 1_000.0,
            vector_score: Some(0.8),
            graph_score: None,
            distance: None,
            document_id: format!("doc-{}", i % 4),
            document_name: format!("Policy {}.pdf", i % 4),
            page_numbers: vec![(i % 20) as u32 + 1],
            relationship_path: None,
            citation: None,
        })
        .collect()
}

fn bench_context_build(c: &mut Criterion) {
    let builder = ContextBuilder::new(
        TokenCounter::with_default_cache().unwrap(),
        ContextConfig::default(),
    );
    let merged = merged_candidates();

    c.bench_function("context_build_200_candidates_8k", |b| {
        b.iter(|| builder.build(&merged, 8_000, 5));
    });
}

fn bench_merge(c: &mut Criterion) {
    let merger = ResultMerger::new(&MergeConfig::default());
    let vector: Vec<_> = (0..200).map(vector_hit).collect();
    let graph: Vec<_> = (0..100).map(graph_hit).collect();

    c.bench_function("merge_200_vector_100_graph", |b| {
        b.iter(|| merger.merge(&vector, &graph));
    });
}

criterion_group!(benches, bench_context_build, bench_merge);
criterion_main!(benches);
