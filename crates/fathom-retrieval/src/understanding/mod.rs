//! Query understanding: intent, entities, expansion, workflow context, filters.
//!
//! Analysis of the query text is pure. The workflow context fetch is the only
//! I/O and is kept separate so the engine can run it alongside embedding.

pub mod classifier;
pub mod expansion;
pub mod extractor;
pub mod filters;
pub mod text;

use std::sync::Arc;

use fathom_core::config::RetrievalConfig;
use fathom_core::intent::Intent;
use fathom_core::models::{ExtractedEntities, QueryPlan, StageOutcome, WorkflowContext};
use fathom_core::traits::{IDocumentStore, IEntityExtractor, IExtractionStore, IIntentClassifier};
use tracing::{debug, warn};

pub use classifier::KeywordClassifier;
pub use extractor::PatternExtractor;

/// Result of analysing query text, before any store is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnalysis {
    pub query: String,
    pub workflow_id: String,
    pub intent: Intent,
    pub entities: ExtractedEntities,
    /// Original query first.
    pub variants: Vec<String>,
}

/// Workflow context plus how its fetch went.
#[derive(Debug, Clone, Default)]
pub struct ContextFetch {
    pub context: WorkflowContext,
    pub outcome: StageOutcome,
}

pub struct QueryUnderstanding {
    classifier: Arc<dyn IIntentClassifier>,
    extractor: Arc<dyn IEntityExtractor>,
    extraction_store: Arc<dyn IExtractionStore>,
    document_store: Arc<dyn IDocumentStore>,
    max_query_variants: usize,
}

impl QueryUnderstanding {
    pub fn new(
        extraction_store: Arc<dyn IExtractionStore>,
        document_store: Arc<dyn IDocumentStore>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier),
            extractor: Arc::new(PatternExtractor),
            extraction_store,
            document_store,
            max_query_variants: config.max_query_variants,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IIntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn IEntityExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Classify, extract and expand. An explicit intent skips classification.
    pub fn analyze(
        &self,
        query: &str,
        workflow_id: &str,
        intent_override: Option<Intent>,
    ) -> QueryAnalysis {
        let intent = intent_override.unwrap_or_else(|| self.classifier.classify(query));
        let entities = self.extractor.extract(query);
        let variants = expansion::expand_query(query, self.max_query_variants);

        debug!(
            %intent,
            explicit = intent_override.is_some(),
            variants = variants.len(),
            coverage_types = entities.coverage_types.len(),
            names = entities.names.len(),
            "query analysed"
        );

        QueryAnalysis {
            query: query.to_string(),
            workflow_id: workflow_id.to_string(),
            intent,
            entities,
            variants,
        }
    }

    /// Fetch every section for the target documents, or for every document
    /// in the workflow when no targets are given.
    ///
    /// Store failures are logged and degrade to what was fetched so far.
    pub fn fetch_context(
        &self,
        workflow_id: &str,
        target_document_ids: Option<&[String]>,
    ) -> ContextFetch {
        let document_ids = match target_document_ids {
            Some(ids) if !ids.is_empty() => ids.to_vec(),
            _ => match self.document_store.list_documents(workflow_id) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(workflow_id, error = %e, "listing workflow documents failed");
                    return ContextFetch {
                        context: WorkflowContext::default(),
                        outcome: StageOutcome::Degraded,
                    };
                }
            },
        };

        if document_ids.is_empty() {
            return ContextFetch::default();
        }

        match self
            .extraction_store
            .get_workflow_sections(workflow_id, &document_ids)
        {
            Ok(sections) => {
                debug!(
                    documents = document_ids.len(),
                    sections = sections.len(),
                    "workflow context fetched"
                );
                ContextFetch {
                    context: WorkflowContext {
                        document_ids,
                        sections,
                    },
                    outcome: StageOutcome::Completed,
                }
            }
            Err(e) => {
                warn!(workflow_id, error = %e, "fetching workflow sections failed");
                ContextFetch {
                    context: WorkflowContext {
                        document_ids,
                        sections: Vec::new(),
                    },
                    outcome: StageOutcome::Degraded,
                }
            }
        }
    }

    /// Combine an analysis with its fetched context into an immutable plan.
    pub fn plan(&self, analysis: QueryAnalysis, context: WorkflowContext) -> QueryPlan {
        let (section_filters, entity_filters) =
            filters::derive_filters(analysis.intent, &analysis.entities, &context);

        QueryPlan::builder(analysis.query, analysis.workflow_id)
            .intent(analysis.intent)
            .variants(analysis.variants)
            .entities(analysis.entities)
            .context(context)
            .section_filters(section_filters)
            .entity_filters(entity_filters)
            .build()
    }

    /// Full understanding step: analyse, fetch context, plan.
    pub fn understand(
        &self,
        query: &str,
        workflow_id: &str,
        target_document_ids: Option<&[String]>,
    ) -> QueryPlan {
        let analysis = self.analyze(query, workflow_id, None);
        let fetched = self.fetch_context(workflow_id, target_document_ids);
        self.plan(analysis, fetched.context)
    }
}
