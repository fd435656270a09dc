//! Additive boosts shared by the vector reranker and graph relevance scoring.

pub mod recency;
pub mod weight_matrix;

use chrono::NaiveDate;
use fathom_core::config::defaults::COVERAGE_BOOST_RATIO;
use fathom_core::config::RetrievalConfig;
use fathom_core::constants::COVERAGE_ENTITY_TYPE;
use fathom_core::intent::Intent;
use fathom_core::models::QueryPlan;

pub use weight_matrix::SectionWeights;

/// Section, entity and recency boosts for one configuration.
pub struct Scorer {
    weights: SectionWeights,
    entity_boost: f64,
    recency_max_boost: f64,
    recency_window_days: i64,
}

impl Scorer {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            weights: SectionWeights::default_weights(),
            entity_boost: config.entity_boost,
            recency_max_boost: config.recency_max_boost,
            recency_window_days: config.recency_window_days,
        }
    }

    pub fn section_boost(&self, intent: Intent, section_type: &str) -> f64 {
        self.weights.boost(intent, section_type)
    }

    /// Full boost when the entity type is filtered for or hinted by the
    /// query (once), plus a partial boost for coverage entities when the
    /// query named a coverage type.
    pub fn entity_boost(&self, plan: &QueryPlan, entity_type: &str) -> f64 {
        let mut boost = 0.0;
        if plan.entity_filters().iter().any(|t| t == entity_type)
            || plan.entities().entity_type_hints.contains(entity_type)
        {
            boost += self.entity_boost;
        }
        if entity_type == COVERAGE_ENTITY_TYPE && plan.entities().has_coverage_types() {
            boost += COVERAGE_BOOST_RATIO * self.entity_boost;
        }
        boost
    }

    pub fn recency_boost(&self, date: Option<NaiveDate>, today: NaiveDate) -> f64 {
        recency::recency_boost(date, today, self.recency_max_boost, self.recency_window_days)
    }
}
