//! Summary text for results included in summary form.

use fathom_core::models::MergedResult;

/// Longest prefix of `text` with at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// The result's own summary when it has one, else
/// `"{entity_type} {entity_id}: {snippet}"`.
pub fn summary_text(result: &MergedResult, snippet_chars: usize) -> String {
    if let Some(summary) = result.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            return summary.to_string();
        }
    }

    let flattened = result.content.split_whitespace().collect::<Vec<_>>().join(" ");
    let snippet = truncate_chars(&flattened, snippet_chars);
    let ellipsis = if snippet.len() < flattened.len() { "..." } else { "" };
    if snippet.is_empty() {
        format!("{} {}", result.entity_type, result.entity_id)
    } else {
        format!("{} {}: {snippet}{ellipsis}", result.entity_type, result.entity_id)
    }
}
