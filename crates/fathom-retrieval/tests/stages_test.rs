//! Stage-by-stage tests: understanding, vector retrieval and graph expansion
//! driven directly, without the engine.

use std::sync::Arc;

use chrono::NaiveDate;
use fathom_core::config::FathomConfig;
use fathom_core::intent::Intent;
use fathom_core::models::StageOutcome;
use fathom_embeddings::EmbeddingHandle;
use fathom_retrieval::scoring::Scorer;
use fathom_retrieval::{ContextBuilder, GraphExpander, QueryUnderstanding, ResultMerger, VectorRetriever};
use fathom_tokens::TokenCounter;
use test_fixtures::{policy_corpus, FailingStore, FixtureStores};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn setup() -> (FathomConfig, FixtureStores) {
    let config = FathomConfig::default();
    let stores = policy_corpus().stores(config.embedding.dimensions);
    (config, stores)
}

fn understanding(config: &FathomConfig, stores: &FixtureStores) -> QueryUnderstanding {
    QueryUnderstanding::new(
        stores.extraction_store.clone(),
        stores.document_store.clone(),
        &config.retrieval,
    )
}

fn retriever(config: &FathomConfig, stores: &FixtureStores) -> VectorRetriever {
    VectorRetriever::new(
        Arc::new(EmbeddingHandle::hashing(&config.embedding)),
        stores.vector_store.clone(),
        stores.extraction_store.clone(),
        stores.document_store.clone(),
        &config.retrieval,
    )
    .with_today(today())
}

fn expander(config: &FathomConfig, stores: &FixtureStores) -> GraphExpander {
    GraphExpander::new(
        stores.graph_store.clone(),
        stores.extraction_store.clone(),
        Scorer::new(&config.retrieval),
        config.graph.clone(),
    )
}

#[test]
fn understand_builds_plan_from_workflow() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("What is my property deductible?", "wf-acme", None);

    assert_eq!(plan.intent(), Intent::Qa);
    assert_eq!(plan.traversal_depth(), 1);
    assert_eq!(plan.variants()[0], "What is my property deductible?");
    assert_eq!(plan.document_ids(), ["doc-1".to_string(), "doc-2".to_string()].as_slice());
    assert!(!plan.context().sections.is_empty());
    assert!(plan
        .context()
        .sections
        .iter()
        .all(|s| s.workflow_id == "wf-acme"));
}

#[test]
fn understand_respects_target_documents() {
    let (config, stores) = setup();
    let targets = vec!["doc-2".to_string()];
    let plan = understanding(&config, &stores).understand("List all exclusions", "wf-acme", Some(&targets));
    assert_eq!(plan.document_ids(), targets.as_slice());
    assert!(plan.context().sections.iter().all(|s| s.document_id == "doc-2"));
}

#[test]
fn retrieve_scores_with_section_entity_and_recency_boosts() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("What is my property deductible?", "wf-acme", None);
    let results = retriever(&config, &stores).retrieve(&plan);
    assert_eq!(stores.vector_store.calls(), 1);

    let scorer = Scorer::new(&config.retrieval);
    let hit = results
        .iter()
        .find(|r| r.entity_id == "doc-1_deductibles_0")
        .unwrap();
    let expected = hit.similarity
        + scorer.section_boost(Intent::Qa, "deductibles")
        + scorer.entity_boost(&plan, "deductible")
        + scorer.recency_boost(hit.recency_date, today());
    assert!((hit.final_score - expected).abs() < 1e-9);
    assert!((0.0..=1.0).contains(&hit.similarity));
    assert!(hit.recency_date.is_some());
    assert!(results.iter().all(|r| r.section_type == "deductibles"));
}

#[test]
fn analysis_plan_boosts_coverage_without_narrowing_entities() {
    let (config, stores) = setup();
    let understanding = understanding(&config, &stores);
    let analysis = understanding.analyze("What is my property deductible?", "wf-acme", Some(Intent::Analysis));
    let fetched = understanding.fetch_context("wf-acme", None);
    let plan = understanding.plan(analysis, fetched.context);

    assert!(plan.entity_filters().is_empty());
    assert!(plan.entities().entity_type_hints.contains("deductible"));

    let later = NaiveDate::from_ymd_opt(2028, 1, 1).unwrap();
    let results = retriever(&config, &stores).with_today(later).retrieve(&plan);
    assert!(results.iter().any(|r| r.entity_type == "exclusion"));

    let coverage = results
        .iter()
        .find(|r| r.entity_id == "doc-1_coverages_0")
        .unwrap();
    // section 0.15 + half entity boost for a named coverage type; no recency
    let expected = coverage.similarity + 0.15 + 0.05;
    assert!((coverage.final_score - expected).abs() < 1e-9);

    let deductible = results
        .iter()
        .find(|r| r.entity_id == "doc-1_deductibles_0")
        .unwrap();
    let scorer = Scorer::new(&config.retrieval);
    let expected = deductible.similarity + scorer.section_boost(Intent::Analysis, "deductibles") + 0.10;
    assert!((deductible.final_score - expected).abs() < 1e-9);
}

#[test]
fn retrieve_swallows_store_failure() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("What is my property deductible?", "wf-acme", None);
    let retriever = VectorRetriever::new(
        Arc::new(EmbeddingHandle::hashing(&config.embedding)),
        Arc::new(FailingStore),
        stores.extraction_store.clone(),
        stores.document_store.clone(),
        &config.retrieval,
    );
    assert!(retriever.retrieve(&plan).is_empty());
    assert!(retriever
        .try_retrieve_with_embeddings(&plan, vec![vec![0.1; config.embedding.dimensions]])
        .is_err());
}

#[test]
fn expansion_finds_parent_coverage_at_distance_one() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("What is my property deductible?", "wf-acme", None);
    let hits = retriever(&config, &stores).retrieve(&plan);
    let expansion = expander(&config, &stores).expand(&plan, &hits);

    assert_eq!(expansion.outcome, StageOutcome::Completed);
    assert_eq!(expansion.mapped_nodes, 1);
    let coverage = expansion
        .results
        .iter()
        .find(|r| r.entity_id == "doc-1_coverages_0")
        .unwrap();
    assert_eq!(coverage.distance, 1);
    assert!(coverage.relevance_score >= config.graph.distance_decay);
    assert!(expansion.results.iter().all(|r| r.distance == 1));
    for pair in expansion.results.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
}

#[test]
fn expansion_hydrates_sparse_exclusion_two_hops_out() {
    let (config, stores) = setup();
    let understanding = understanding(&config, &stores);
    let analysis = understanding.analyze(
        "How does the flood endorsement affect building coverage?",
        "wf-acme",
        Some(Intent::Analysis),
    );
    let plan = understanding.plan(analysis, understanding.fetch_context("wf-acme", None).context);
    let hits: Vec<_> = retriever(&config, &stores)
        .retrieve(&plan)
        .into_iter()
        .filter(|r| r.entity_id == "doc-1_endorsements_0")
        .collect();
    assert_eq!(hits.len(), 1);

    let expansion = expander(&config, &stores).expand(&plan, &hits);
    assert_eq!(expansion.hydrated, 1);
    let flood = expansion
        .results
        .iter()
        .find(|r| r.entity_id == "doc-1_exclusions_0")
        .unwrap();
    assert_eq!(flood.distance, 2);
    assert_eq!(flood.relationship_path, vec!["MODIFIES", "HAS_EXCLUSION"]);
    let wording = flood.properties["wording"].as_str().unwrap();
    assert!(wording.contains("flood"));
    assert!(expansion.results.iter().all(|r| r.entity_id != "orphan_1"));
}

#[test]
fn expansion_skipped_without_hits() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("anything", "wf-acme", None);
    let expansion = expander(&config, &stores).expand(&plan, &[]);
    assert_eq!(expansion.outcome, StageOutcome::Skipped);
    assert!(expansion.results.is_empty());
}

#[test]
fn stages_compose_into_cited_context() {
    let (config, stores) = setup();
    let plan = understanding(&config, &stores).understand("List all exclusions in this policy", "wf-acme", None);
    let hits = retriever(&config, &stores).retrieve(&plan);
    let expansion = expander(&config, &stores).expand(&plan, &hits);
    let merged = ResultMerger::new(&config.merge).merge(&hits, &expansion.results);

    let builder = ContextBuilder::new(TokenCounter::with_default_cache().unwrap(), config.context.clone());
    let payload = builder.build_default(&merged);
    assert_eq!(payload.total_candidates, merged.len());
    assert!(payload.full_text.len() <= config.context.top_n_full_text);
    for result in payload.results() {
        let label = result.citation.as_deref().unwrap();
        let entry = &payload.provenance[label];
        assert_eq!(entry.document_id, result.document_id);
    }
}
