//! Content, page and document-name resolution for vector hits.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use fathom_core::models::{
    format_scalar, humanize_key, ExtractedPayload, FieldMap, QueryPlan, SectionRecord,
    VectorSearchResult,
};
use fathom_core::traits::{IDocumentStore, IExtractionStore};
use tracing::warn;

/// Numeric suffix of an entity id after its last `_`, `-` or `:`.
///
/// `doc-1_coverages_2` → 2. Ids without a numeric suffix give `None`.
pub fn entity_index(entity_id: &str) -> Option<usize> {
    let (_, suffix) = entity_id.rsplit_once(['_', '-', ':'])?;
    suffix.parse().ok()
}

/// `Key: value` lines for every non-empty field, in key order.
pub fn render_fields(fields: &FieldMap) -> String {
    fields
        .iter()
        .filter_map(|(key, value)| {
            let rendered = format_scalar(value);
            (!rendered.trim().is_empty()).then(|| format!("{}: {}", humanize_key(key), rendered))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn placeholder(section_type: &str) -> String {
    format!("[No extracted content available for the {section_type} section]")
}

/// Content for one hit from its section record.
///
/// List payloads are indexed by the entity id's numeric suffix, falling back
/// to the first item; flat payloads are rendered whole. An empty rendering
/// yields `None`.
pub fn content_from_record(record: &SectionRecord, entity_id: &str) -> Option<String> {
    let rendered = match &record.payload {
        ExtractedPayload::List(items) => {
            let item = entity_index(entity_id)
                .and_then(|i| items.get(i))
                .or_else(|| items.first())?;
            render_fields(item)
        }
        ExtractedPayload::Flat(fields) => render_fields(fields),
    };
    (!rendered.is_empty()).then_some(rendered)
}

pub struct ContentResolver {
    extraction_store: Arc<dyn IExtractionStore>,
    document_store: Arc<dyn IDocumentStore>,
}

impl ContentResolver {
    pub fn new(
        extraction_store: Arc<dyn IExtractionStore>,
        document_store: Arc<dyn IDocumentStore>,
    ) -> Self {
        Self {
            extraction_store,
            document_store,
        }
    }

    /// Fill content, pages and document names in place.
    ///
    /// Sections already in the plan's workflow context are used directly;
    /// others are fetched once per `(document, section type)`. When no
    /// section record exists the embedded text is kept, and when that is
    /// empty a placeholder naming the section is used.
    pub fn resolve(&self, plan: &QueryPlan, results: &mut [VectorSearchResult]) {
        let mut fetched: HashMap<(String, String), Option<SectionRecord>> = HashMap::new();

        for result in results.iter_mut() {
            let key = (result.document_id.clone(), result.section_type.clone());
            let record = match plan
                .context()
                .find_section(&result.document_id, &result.section_type)
            {
                Some(record) => Some(record),
                None => fetched
                    .entry(key)
                    .or_insert_with(|| {
                        self.fetch_section(plan, &result.document_id, &result.section_type)
                    })
                    .as_ref(),
            };

            if let Some(record) = record {
                if let Some(content) = content_from_record(record, &result.entity_id) {
                    result.content = content;
                }
                result.page_numbers = record.pages();
            }
            if result.content.trim().is_empty() {
                result.content = placeholder(&result.section_type);
            }
        }

        let names = self.resolve_names(results);
        for result in results.iter_mut() {
            result.document_name = names
                .get(&result.document_id)
                .cloned()
                .unwrap_or_else(|| result.document_id.clone());
        }
    }

    fn fetch_section(
        &self,
        plan: &QueryPlan,
        document_id: &str,
        section_type: &str,
    ) -> Option<SectionRecord> {
        match self
            .extraction_store
            .get_sections(document_id, section_type, plan.workflow_id())
        {
            Ok(records) => records.into_iter().find(|r| !r.payload.is_empty()),
            Err(e) => {
                warn!(document_id, section_type, error = %e, "section lookup failed");
                None
            }
        }
    }

    /// One name lookup for all unique document ids, in first-seen order.
    fn resolve_names(&self, results: &[VectorSearchResult]) -> HashMap<String, String> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = results
            .iter()
            .filter(|r| seen.insert(r.document_id.as_str()))
            .map(|r| r.document_id.clone())
            .collect();
        if ids.is_empty() {
            return HashMap::new();
        }
        self.document_store.resolve_names(&ids).unwrap_or_else(|e| {
            warn!(documents = ids.len(), error = %e, "document name lookup failed");
            HashMap::new()
        })
    }
}
