//! Citation labels and the provenance index.

use fathom_core::models::{MergedResult, ProvenanceEntry};

/// `[n]`, 1-based.
pub fn label(position: usize) -> String {
    format!("[{position}]")
}

pub fn provenance_for(result: &MergedResult) -> ProvenanceEntry {
    ProvenanceEntry {
        document_name: result.document_name.clone(),
        document_id: result.document_id.clone(),
        page_numbers: result.page_numbers.clone(),
        section_type: result.section_type.clone(),
        relationship_path: result.relationship_path.clone().filter(|p| !p.is_empty()),
    }
}

/// Compact page list: `p. 4`, `pp. 2-4`, `pp. 2, 5, 7`.
pub fn format_pages(pages: &[u32]) -> Option<String> {
    let mut pages = pages.to_vec();
    pages.sort_unstable();
    pages.dedup();
    match pages.as_slice() {
        [] => None,
        [single] => Some(format!("p. {single}")),
        [first, .., last] if (last - first) as usize + 1 == pages.len() => {
            Some(format!("pp. {first}-{last}"))
        }
        many => Some(format!(
            "pp. {}",
            many.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
        )),
    }
}

/// One-line human-checkable source reference.
pub fn format_source(entry: &ProvenanceEntry) -> String {
    let mut parts = vec![entry.document_name.clone()];
    if let Some(section) = entry.section_type.as_deref().filter(|s| !s.is_empty()) {
        parts.push(section.to_string());
    }
    if let Some(pages) = format_pages(&entry.page_numbers) {
        parts.push(pages);
    }
    if let Some(path) = &entry.relationship_path {
        parts.push(format!("via {}", path.join(" > ")));
    }
    parts.join(", ")
}
