use crate::errors::FathomResult;
use crate::models::{FieldMap, SectionRecord};

/// Relational store of extracted section payloads.
pub trait IExtractionStore: Send + Sync {
    /// Sections of one type for one document, scoped to a workflow.
    fn get_sections(
        &self,
        document_id: &str,
        section_type: &str,
        workflow_id: &str,
    ) -> FathomResult<Vec<SectionRecord>>;

    /// Every section for the given documents in a workflow.
    fn get_workflow_sections(
        &self,
        workflow_id: &str,
        document_ids: &[String],
    ) -> FathomResult<Vec<SectionRecord>>;

    /// Full attribute set of one extracted entity, looked up by its stable key.
    fn get_entity_by_key(&self, entity_type: &str, key: &str) -> FathomResult<Option<FieldMap>>;
}
