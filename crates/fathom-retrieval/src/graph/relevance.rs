//! Relevance scoring of traversal results.

use fathom_core::config::GraphConfig;
use fathom_core::models::{GraphTraversalResult, QueryPlan};

use crate::scoring::Scorer;

const NAME_PROPERTIES: &[&str] = &["name", "title"];

/// Whether a `name`/`title` property contains any extracted name.
pub fn matches_name(result: &GraphTraversalResult, plan: &QueryPlan) -> bool {
    let names = &plan.entities().names;
    if names.is_empty() {
        return false;
    }
    NAME_PROPERTIES
        .iter()
        .filter_map(|k| result.property_str(k))
        .any(|value| {
            let value = value.to_lowercase();
            names.iter().any(|n| value.contains(&n.to_lowercase()))
        })
}

/// `decay^distance + section boost + entity boost + name boost`.
pub fn relevance(
    plan: &QueryPlan,
    scorer: &Scorer,
    config: &GraphConfig,
    result: &GraphTraversalResult,
) -> f64 {
    let exponent = i32::try_from(result.distance).unwrap_or(i32::MAX);
    let mut score = config.distance_decay.powi(exponent);
    score += scorer.section_boost(plan.intent(), result.section_type.as_deref().unwrap_or(""));
    score += scorer.entity_boost(plan, &result.entity_type);
    if matches_name(result, plan) {
        score += config.name_match_boost;
    }
    score
}

/// Score every result and sort by relevance, highest first. Ties keep
/// traversal order.
pub fn score_and_sort(
    plan: &QueryPlan,
    scorer: &Scorer,
    config: &GraphConfig,
    results: Vec<GraphTraversalResult>,
) -> Vec<GraphTraversalResult> {
    let mut scored: Vec<GraphTraversalResult> = results
        .into_iter()
        .map(|mut r| {
            r.relevance_score = relevance(plan, scorer, config, &r);
            r
        })
        .collect();
    scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    scored
}
