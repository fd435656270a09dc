//! Hierarchical, token-budgeted context assembly.
//!
//! The top candidates are tried verbatim and the rest as summaries, all
//! charged against `floor(safety_margin * max_tokens)`. Accepted entries are
//! labelled `[1]`, `[2]`, ... in acceptance order, each with a provenance
//! entry.

pub mod provenance;
pub mod render;
pub mod summary;

use fathom_core::config::ContextConfig;
use fathom_core::models::{ContextPayload, MergedResult};
use fathom_tokens::{TokenBudget, TokenCounter};
use tracing::debug;

pub use render::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    FullText,
    Summary,
}

pub struct ContextBuilder {
    counter: TokenCounter,
    config: ContextConfig,
}

impl ContextBuilder {
    pub fn new(counter: TokenCounter, config: ContextConfig) -> Self {
        Self { counter, config }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    fn cost(&self, text: &str) -> usize {
        TokenBudget::entry_cost(&self.counter, text, self.config.entry_overhead_tokens)
    }

    /// Build with the configured budget and full-text count.
    pub fn build_default(&self, merged: &[MergedResult]) -> ContextPayload {
        self.build(merged, self.config.max_tokens, self.config.top_n_full_text)
    }

    /// Assemble a payload from ranked candidates. The input is not modified;
    /// the same input always produces the same payload.
    pub fn build(
        &self,
        merged: &[MergedResult],
        max_tokens: usize,
        top_n_full_text: usize,
    ) -> ContextPayload {
        let mut budget = TokenBudget::with_margin(max_tokens, self.config.safety_margin);
        let mut payload = ContextPayload {
            total_candidates: merged.len(),
            ..ContextPayload::default()
        };
        let mut downgraded = 0usize;
        let mut dropped = 0usize;

        for (position, candidate) in merged.iter().enumerate() {
            let accepted = if position < top_n_full_text {
                if budget.try_spend(self.cost(&candidate.content)) {
                    Some((Tier::FullText, None))
                } else {
                    let summary = summary::summary_text(candidate, self.config.summary_snippet_chars);
                    if budget.try_spend(self.cost(&summary)) {
                        downgraded += 1;
                        Some((Tier::Summary, Some(summary)))
                    } else {
                        None
                    }
                }
            } else {
                let summary = summary::summary_text(candidate, self.config.summary_snippet_chars);
                if !budget.try_spend(self.cost(&summary)) {
                    dropped += merged.len() - position;
                    break;
                }
                Some((Tier::Summary, Some(summary)))
            };

            let Some((tier, summary)) = accepted else {
                dropped += 1;
                continue;
            };

            let label = provenance::label(payload.result_count() + 1);
            let mut entry = candidate.clone();
            entry.citation = Some(label.clone());
            if summary.is_some() {
                entry.summary = summary;
            }
            payload
                .provenance
                .insert(label, provenance::provenance_for(&entry));
            match tier {
                Tier::FullText => payload.full_text.push(entry),
                Tier::Summary => payload.summaries.push(entry),
            }
        }

        payload.total_tokens = budget.used();
        debug!(
            candidates = merged.len(),
            full_text = payload.full_text.len(),
            summaries = payload.summaries.len(),
            downgraded,
            dropped,
            tokens = budget.used(),
            limit = budget.limit(),
            "context assembled"
        );
        payload
    }
}
