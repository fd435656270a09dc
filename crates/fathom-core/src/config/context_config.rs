use serde::{Deserialize, Serialize};

use super::defaults;

/// Hierarchical context builder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Default token budget for the assembled context.
    pub max_tokens: usize,
    /// How many top candidates are tried as full text.
    pub top_n_full_text: usize,
    /// Fraction of `max_tokens` usable; the rest is left for prompt scaffolding.
    pub safety_margin: f64,
    /// Fixed per-entry cost for labels, headers and separators.
    pub entry_overhead_tokens: usize,
    /// Snippet length (chars) for generated fallback summaries.
    pub summary_snippet_chars: usize,
}

impl ContextConfig {
    /// Effective token limit for a budget under this config's safety margin.
    pub fn effective_limit(&self, max_tokens: usize) -> usize {
        (max_tokens as f64 * self.safety_margin).floor() as usize
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            top_n_full_text: defaults::DEFAULT_TOP_N_FULL_TEXT,
            safety_margin: defaults::DEFAULT_SAFETY_MARGIN,
            entry_overhead_tokens: defaults::DEFAULT_ENTRY_OVERHEAD_TOKENS,
            summary_snippet_chars: defaults::DEFAULT_SUMMARY_SNIPPET_CHARS,
        }
    }
}
