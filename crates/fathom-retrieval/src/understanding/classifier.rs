//! Keyword intent classification.

use fathom_core::intent::Intent;
use fathom_core::traits::IIntentClassifier;

use super::text::{contains_phrase, padded_lowercase};

/// Keyword/phrase patterns per intent, matched on word boundaries.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Audit,
        &[
            "audit",
            "every",
            "all exclusions",
            "all conditions",
            "all endorsements",
            "list all",
            "complete list",
            "comprehensive",
            "review all",
            "compliance",
            "gaps",
            "missing",
            "verify",
            "thorough",
        ],
    ),
    (
        Intent::Analysis,
        &[
            "compare",
            "analyze",
            "analysis",
            "how does",
            "impact",
            "affect",
            "affects",
            "why",
            "difference",
            "versus",
            "vs",
            "interact",
            "modify",
            "modifies",
            "implications",
            "explain",
            "relationship",
        ],
    ),
    (
        Intent::Qa,
        &[
            "what is",
            "what's",
            "what are",
            "how much",
            "when",
            "who",
            "which",
            "is there",
            "does my",
            "do i have",
        ],
    ),
];

/// Scores each intent by keyword hits; the highest wins.
///
/// Ties are resolved AUDIT > ANALYSIS > QA. No hits at all means QA.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Hit count per intent, in AUDIT, ANALYSIS, QA order.
    pub fn scores(&self, query: &str) -> Vec<(Intent, usize)> {
        let padded = padded_lowercase(query);
        INTENT_KEYWORDS
            .iter()
            .map(|&(intent, keywords)| {
                let hits = keywords
                    .iter()
                    .filter(|kw| contains_phrase(&padded, kw))
                    .count();
                (intent, hits)
            })
            .collect()
    }
}

impl IIntentClassifier for KeywordClassifier {
    fn classify(&self, query: &str) -> Intent {
        let mut best = Intent::Qa;
        let mut best_score = 0usize;
        // Priority order: a later intent must strictly beat an earlier one.
        for (intent, score) in self.scores(query) {
            if score > best_score {
                best = intent;
                best_score = score;
            }
        }
        best
    }
}
