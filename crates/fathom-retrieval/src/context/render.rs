//! Plain-text rendering of a context payload.

use fathom_core::constants::NO_RELEVANT_CONTEXT;
use fathom_core::models::{ContextPayload, MergedResult};

use super::provenance::format_source;

const FULL_TEXT_HEADER: &str = "## Detailed context";
const SUMMARY_HEADER: &str = "## Additional context";

fn header_line(payload: &ContextPayload, result: &MergedResult) -> String {
    let label = result.citation.as_deref().unwrap_or_default();
    match payload.provenance.get(label) {
        Some(entry) => format!("{label} {}", format_source(entry)),
        None => label.to_string(),
    }
}

/// Full-text entries first, then summaries, each prefixed by its label and
/// source. An empty payload renders the no-relevant-context message.
pub fn render(payload: &ContextPayload) -> String {
    if payload.is_empty() {
        return NO_RELEVANT_CONTEXT.to_string();
    }

    let mut blocks = Vec::new();
    if !payload.full_text.is_empty() {
        blocks.push(FULL_TEXT_HEADER.to_string());
        for result in &payload.full_text {
            blocks.push(format!("{}\n{}", header_line(payload, result), result.content.trim()));
        }
    }
    if !payload.summaries.is_empty() {
        blocks.push(SUMMARY_HEADER.to_string());
        for result in &payload.summaries {
            let label = result.citation.as_deref().unwrap_or_default();
            let summary = result.summary.as_deref().unwrap_or(&result.content);
            blocks.push(format!("{label} {summary}"));
        }
    }
    blocks.join("\n\n")
}
