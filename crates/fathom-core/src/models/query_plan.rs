use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

use super::entities::ExtractedEntities;
use super::extraction::SectionRecord;

/// Documents in scope for a query, plus every section extracted from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowContext {
    pub document_ids: Vec<String>,
    pub sections: Vec<SectionRecord>,
}

impl WorkflowContext {
    /// Section types present across the fetched sections.
    pub fn section_types(&self) -> BTreeSet<&str> {
        self.sections.iter().map(|s| s.section_type.as_str()).collect()
    }

    /// First section record for a document/section pair.
    pub fn find_section(&self, document_id: &str, section_type: &str) -> Option<&SectionRecord> {
        self.sections
            .iter()
            .find(|s| s.document_id == document_id && s.section_type == section_type)
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty() && self.sections.is_empty()
    }
}

/// The output of query understanding. Immutable once built: fields are only
/// reachable through accessors and the builder is consumed by `build`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    query: String,
    workflow_id: String,
    intent: Intent,
    traversal_depth: usize,
    entities: ExtractedEntities,
    variants: Vec<String>,
    context: WorkflowContext,
    section_filters: Vec<String>,
    entity_filters: Vec<String>,
}

impl QueryPlan {
    pub fn builder(query: impl Into<String>, workflow_id: impl Into<String>) -> QueryPlanBuilder {
        QueryPlanBuilder::new(query.into(), workflow_id.into())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn traversal_depth(&self) -> usize {
        self.traversal_depth
    }

    pub fn entities(&self) -> &ExtractedEntities {
        &self.entities
    }

    /// Expanded query variants. The original query is always first.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    pub fn document_ids(&self) -> &[String] {
        &self.context.document_ids
    }

    pub fn section_filters(&self) -> &[String] {
        &self.section_filters
    }

    pub fn entity_filters(&self) -> &[String] {
        &self.entity_filters
    }

    /// Filter lists as store arguments: an empty list means "no filter".
    pub fn section_filter_arg(&self) -> Option<Vec<String>> {
        non_empty(&self.section_filters)
    }

    pub fn entity_filter_arg(&self) -> Option<Vec<String>> {
        non_empty(&self.entity_filters)
    }

    pub fn document_filter_arg(&self) -> Option<Vec<String>> {
        non_empty(&self.context.document_ids)
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Builder for [`QueryPlan`].
#[derive(Debug, Clone)]
pub struct QueryPlanBuilder {
    query: String,
    workflow_id: String,
    intent: Intent,
    entities: ExtractedEntities,
    variants: Vec<String>,
    context: WorkflowContext,
    section_filters: Vec<String>,
    entity_filters: Vec<String>,
}

impl QueryPlanBuilder {
    fn new(query: String, workflow_id: String) -> Self {
        Self {
            query,
            workflow_id,
            intent: Intent::Qa,
            entities: ExtractedEntities::default(),
            variants: Vec::new(),
            context: WorkflowContext::default(),
            section_filters: Vec::new(),
            entity_filters: Vec::new(),
        }
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    pub fn entities(mut self, entities: ExtractedEntities) -> Self {
        self.entities = entities;
        self
    }

    /// Additional variants; duplicates of the original or of each other are dropped.
    pub fn variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    pub fn context(mut self, context: WorkflowContext) -> Self {
        self.context = context;
        self
    }

    pub fn section_filters(mut self, filters: Vec<String>) -> Self {
        self.section_filters = filters;
        self
    }

    pub fn entity_filters(mut self, filters: Vec<String>) -> Self {
        self.entity_filters = filters;
        self
    }

    pub fn build(self) -> QueryPlan {
        let mut variants = Vec::with_capacity(self.variants.len() + 1);
        variants.push(self.query.clone());
        for variant in self.variants {
            let trimmed = variant.trim();
            if trimmed.is_empty() || variants.iter().any(|v| v.eq_ignore_ascii_case(trimmed)) {
                continue;
            }
            variants.push(trimmed.to_string());
        }

        QueryPlan {
            traversal_depth: self.intent.traversal_depth(),
            query: self.query,
            workflow_id: self.workflow_id,
            intent: self.intent,
            entities: self.entities,
            variants,
            context: self.context,
            section_filters: dedup(self.section_filters),
            entity_filters: dedup(self.entity_filters),
        }
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
