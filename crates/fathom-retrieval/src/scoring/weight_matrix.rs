//! Intent → section type boost matrix.
//!
//! Boosts are additive. A section type missing from an intent's row gets 0.

use std::collections::HashMap;

use fathom_core::intent::Intent;

pub struct SectionWeights {
    weights: HashMap<Intent, HashMap<&'static str, f64>>,
}

impl SectionWeights {
    pub fn default_weights() -> Self {
        let mut weights = HashMap::new();

        // Qa: the declarations page answers most direct questions.
        weights.insert(
            Intent::Qa,
            Self::build_map(&[
                ("declarations", 0.10),
                ("coverages", 0.08),
                ("deductibles", 0.08),
                ("premium", 0.05),
            ]),
        );

        // Analysis: coverage grants and what modifies them.
        weights.insert(
            Intent::Analysis,
            Self::build_map(&[
                ("coverages", 0.15),
                ("exclusions", 0.12),
                ("endorsements", 0.10),
                ("deductibles", 0.10),
                ("conditions", 0.08),
            ]),
        );

        // Audit: restrictions first.
        weights.insert(
            Intent::Audit,
            Self::build_map(&[
                ("exclusions", 0.15),
                ("conditions", 0.15),
                ("endorsements", 0.12),
                ("definitions", 0.10),
                ("declarations", 0.08),
                ("coverages", 0.08),
            ]),
        );

        Self { weights }
    }

    pub fn boost(&self, intent: Intent, section_type: &str) -> f64 {
        self.weights
            .get(&intent)
            .and_then(|m| m.get(section_type))
            .copied()
            .unwrap_or(0.0)
    }

    fn build_map(entries: &[(&'static str, f64)]) -> HashMap<&'static str, f64> {
        entries.iter().copied().collect()
    }
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self::default_weights()
    }
}
