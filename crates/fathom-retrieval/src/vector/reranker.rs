//! Intent-aware reranking of raw vector hits.

use chrono::NaiveDate;
use fathom_core::models::{QueryPlan, VectorCandidate, VectorSearchResult};

use crate::scoring::recency::parse_date;
use crate::scoring::Scorer;

/// `1 - distance`, clamped to [0, 1]. Non-finite distances give 0.
pub fn similarity(distance: f64) -> f64 {
    if !distance.is_finite() {
        return 0.0;
    }
    (1.0 - distance).clamp(0.0, 1.0)
}

/// Score every hit and sort by final score descending, ties broken by
/// document id then entity id.
///
/// `final = similarity + section_boost + entity_boost + recency_boost`.
/// Content, pages and document names are left for content resolution.
pub fn rerank(
    plan: &QueryPlan,
    scorer: &Scorer,
    hits: Vec<(VectorCandidate, f64)>,
    today: NaiveDate,
) -> Vec<VectorSearchResult> {
    let intent = plan.intent();
    let mut results: Vec<VectorSearchResult> = hits
        .into_iter()
        .map(|(candidate, distance)| {
            let similarity = similarity(distance);
            let recency_date = candidate.effective_date.as_deref().and_then(parse_date);
            let final_score = similarity
                + scorer.section_boost(intent, &candidate.section_type)
                + scorer.entity_boost(plan, &candidate.entity_type)
                + scorer.recency_boost(recency_date, today);

            VectorSearchResult {
                embedding_id: candidate.embedding_id,
                document_id: candidate.document_id,
                entity_id: candidate.entity_id,
                canonical_entity_id: candidate.canonical_entity_id,
                content: candidate.content,
                section_type: candidate.section_type,
                entity_type: candidate.entity_type,
                similarity,
                final_score,
                document_name: String::new(),
                page_numbers: Vec::new(),
                recency_date,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| a.document_id.cmp(&b.document_id))
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });
    results
}

#[cfg(test)]
mod tests {
    use fathom_core::config::RetrievalConfig;
    use fathom_core::intent::Intent;
    use fathom_core::models::ExtractedEntities;

    use super::*;

    fn candidate(entity_id: &str, section_type: &str, entity_type: &str) -> VectorCandidate {
        VectorCandidate {
            embedding_id: format!("emb-{entity_id}"),
            document_id: "doc-1".into(),
            entity_id: entity_id.into(),
            canonical_entity_id: None,
            content: String::new(),
            section_type: section_type.into(),
            entity_type: entity_type.into(),
            effective_date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity(0.0), 1.0);
        assert_eq!(similarity(1.0), 0.0);
        assert_eq!(similarity(1.7), 0.0);
        assert_eq!(similarity(-0.3), 1.0);
        assert_eq!(similarity(f64::NAN), 0.0);
    }

    #[test]
    fn final_score_adds_boosts() {
        let mut entities = ExtractedEntities::default();
        entities.coverage_types.insert("property".into());
        entities.entity_type_hints.insert("deductible".into());
        let plan = QueryPlan::builder("What is my property deductible?", "wf")
            .intent(Intent::Analysis)
            .entities(entities)
            .build();
        let scorer = Scorer::new(&RetrievalConfig::default());

        let results = rerank(
            &plan,
            &scorer,
            vec![(candidate("c0", "coverages", "coverage"), 0.2)],
            today(),
        );
        let expected = 0.8 + 0.15 + 0.05;
        assert!((results[0].final_score - expected).abs() < 1e-9);
        assert!((results[0].similarity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn sorted_desc_with_deterministic_ties() {
        let plan = QueryPlan::builder("q", "wf").build();
        let scorer = Scorer::new(&RetrievalConfig::default());
        let results = rerank(
            &plan,
            &scorer,
            vec![
                (candidate("b", "other", "x"), 0.5),
                (candidate("a", "other", "x"), 0.5),
                (candidate("c", "other", "x"), 0.1),
            ],
            today(),
        );
        let ids: Vec<&str> = results.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn recency_uses_effective_date() {
        let plan = QueryPlan::builder("q", "wf").build();
        let scorer = Scorer::new(&RetrievalConfig::default());
        let mut fresh = candidate("fresh", "other", "x");
        fresh.effective_date = Some("2025-06-01".into());
        let results = rerank(&plan, &scorer, vec![(fresh, 0.5)], today());
        assert!((results[0].final_score - 0.55).abs() < 1e-9);
        assert_eq!(results[0].recency_date, Some(today()));
    }

    #[test]
    fn empty_entity_id_stays_empty() {
        let plan = QueryPlan::builder("q", "wf").build();
        let scorer = Scorer::new(&RetrievalConfig::default());
        let results = rerank(&plan, &scorer, vec![(candidate("", "other", "x"), 0.5)], today());
        assert_eq!(results[0].entity_id, "");
        assert_eq!(results[0].embedding_id, "emb-");
    }
}
