//! RetrievalEngine: wires understanding → vector → graph → merge → context.
//!
//! Query analysis is pure. The workflow context fetch and the variant
//! embedding batch run concurrently; graph expansion waits for vector hits.
//! The cancellation token is checked around every external call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use fathom_core::config::FathomConfig;
use fathom_core::errors::{FathomError, FathomResult};
use fathom_core::intent::Intent;
use fathom_core::models::{ContextPayload, QueryPlan, StageDiagnostics, StageOutcome};
use fathom_core::traits::{
    IDocumentStore, IEmbeddingProvider, IEntityExtractor, IExtractionStore, IGraphStore,
    IIntentClassifier, IVectorStore,
};
use fathom_observability::tracing_setup::events;
use fathom_observability::tracing_setup::spans::stages;
use fathom_observability::{MetricsCollector, RetrievalMetrics};
use fathom_tokens::TokenCounter;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::context::{self, ContextBuilder};
use crate::graph::GraphExpander;
use crate::merge::ResultMerger;
use crate::scoring::Scorer;
use crate::understanding::QueryUnderstanding;
use crate::vector::VectorRetriever;

/// External collaborators, shared read-only across requests.
#[derive(Clone)]
pub struct Collaborators {
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub vector_store: Arc<dyn IVectorStore>,
    pub graph_store: Arc<dyn IGraphStore>,
    pub extraction_store: Arc<dyn IExtractionStore>,
    pub document_store: Arc<dyn IDocumentStore>,
}

/// One context assembly request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    pub query: String,
    pub workflow_id: String,
    /// Documents to search; `None` means every document in the workflow.
    pub target_document_ids: Option<Vec<String>>,
    /// Skips intent classification when set.
    pub intent: Option<Intent>,
    pub max_tokens: Option<usize>,
    pub top_n_full_text: Option<usize>,
}

impl RetrievalRequest {
    pub fn new(query: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            workflow_id: workflow_id.into(),
            target_document_ids: None,
            intent: None,
            max_tokens: None,
            top_n_full_text: None,
        }
    }

    pub fn with_documents(mut self, document_ids: Vec<String>) -> Self {
        self.target_document_ids = Some(document_ids);
        self
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_n_full_text(mut self, top_n: usize) -> Self {
        self.top_n_full_text = Some(top_n);
        self
    }
}

/// Everything one request produced.
#[derive(Debug, Clone)]
pub struct RetrievalOutput {
    pub plan: QueryPlan,
    pub payload: ContextPayload,
    pub rendered: String,
    pub diagnostics: StageDiagnostics,
}

fn checkpoint(cancel: &CancellationToken, stage: &str) -> FathomResult<()> {
    if cancel.is_cancelled() {
        events::request_cancelled(stage);
        return Err(FathomError::Cancelled {
            stage: stage.to_string(),
        });
    }
    Ok(())
}

pub struct RetrievalEngine {
    understanding: QueryUnderstanding,
    vector: VectorRetriever,
    graph: GraphExpander,
    merger: ResultMerger,
    context: ContextBuilder,
    metrics: Mutex<MetricsCollector>,
}

impl RetrievalEngine {
    /// Validates the config and loads the tokenizer.
    pub fn new(collaborators: Collaborators, config: &FathomConfig) -> FathomResult<Self> {
        config.validate()?;
        let counter = TokenCounter::new(config.embedding.token_cache_size)?;

        let Collaborators {
            embedder,
            vector_store,
            graph_store,
            extraction_store,
            document_store,
        } = collaborators;

        Ok(Self {
            understanding: QueryUnderstanding::new(
                Arc::clone(&extraction_store),
                Arc::clone(&document_store),
                &config.retrieval,
            ),
            vector: VectorRetriever::new(
                embedder,
                vector_store,
                Arc::clone(&extraction_store),
                document_store,
                &config.retrieval,
            ),
            graph: GraphExpander::new(
                graph_store,
                extraction_store,
                Scorer::new(&config.retrieval),
                config.graph.clone(),
            ),
            merger: ResultMerger::new(&config.merge),
            context: ContextBuilder::new(counter, config.context.clone()),
            metrics: Mutex::new(MetricsCollector::new()),
        })
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IIntentClassifier>) -> Self {
        self.understanding = self.understanding.with_classifier(classifier);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn IEntityExtractor>) -> Self {
        self.understanding = self.understanding.with_extractor(extractor);
        self
    }

    /// Pin the reference date for recency boosts.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.vector = self.vector.with_today(today);
        self
    }

    fn collector(&self) -> MutexGuard<'_, MetricsCollector> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Aggregated stage counts over every completed request.
    pub fn retrieval_metrics(&self) -> RetrievalMetrics {
        self.collector().retrieval.clone()
    }

    pub fn metrics_snapshot(&self) -> serde_json::Value {
        self.collector().snapshot()
    }

    pub fn reset_metrics(&self) {
        self.collector().reset();
    }

    /// Run the full pipeline. Collaborator failures degrade their stage to an
    /// empty result; only cancellation aborts the request.
    pub fn assemble(
        &self,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> FathomResult<RetrievalOutput> {
        let request_id = Uuid::new_v4();
        let span = fathom_observability::assemble_span!(request_id, request.workflow_id);
        let _guard = span.enter();
        let mut diagnostics = StageDiagnostics::default();

        // Understanding, with the embedding batch alongside the context fetch.
        checkpoint(cancel, stages::UNDERSTANDING)?;
        let analysis = self
            .understanding
            .analyze(&request.query, &request.workflow_id, request.intent);
        let (fetched, embedded) = rayon::join(
            || {
                self.understanding
                    .fetch_context(&request.workflow_id, request.target_document_ids.as_deref())
            },
            || self.vector.embed_variants(&analysis.variants),
        );
        checkpoint(cancel, stages::UNDERSTANDING)?;

        diagnostics.understanding = fetched.outcome;
        if fetched.outcome == StageOutcome::Degraded {
            events::stage_degraded(stages::UNDERSTANDING, "workflow context unavailable");
        }
        let plan = self.understanding.plan(analysis, fetched.context);
        diagnostics.intent = Some(plan.intent());
        diagnostics.query_variants = plan.variants().len();
        diagnostics.context_sections = plan.context().sections.len();

        // Vector retrieval.
        let vector_results = match embedded {
            Ok(embeddings) => match self.vector.try_retrieve_with_embeddings(&plan, embeddings) {
                Ok(results) => results,
                Err(e) => {
                    events::stage_degraded(stages::VECTOR, &e.to_string());
                    diagnostics.vector = StageOutcome::Degraded;
                    Vec::new()
                }
            },
            Err(e) => {
                events::stage_degraded(stages::VECTOR, &e.to_string());
                diagnostics.vector = StageOutcome::Degraded;
                Vec::new()
            }
        };
        checkpoint(cancel, stages::VECTOR)?;
        diagnostics.vector_hits = vector_results.len();

        // Graph expansion.
        let expansion = {
            let _stage = fathom_observability::stage_span!(stages::GRAPH).entered();
            self.graph.expand(&plan, &vector_results)
        };
        checkpoint(cancel, stages::GRAPH)?;
        if expansion.outcome == StageOutcome::Degraded {
            events::stage_degraded(stages::GRAPH, "graph store unavailable");
        }
        diagnostics.graph = expansion.outcome;
        diagnostics.mapped_nodes = expansion.mapped_nodes;
        diagnostics.traversed_nodes = expansion.traversed;
        diagnostics.hydrated_nodes = expansion.hydrated;
        diagnostics.graph_results = expansion.results.len();

        // Fusion and context assembly.
        let merged = self.merger.merge(&vector_results, &expansion.results);
        diagnostics.merged_results = merged.len();

        let config = self.context.config();
        let max_tokens = request.max_tokens.unwrap_or(config.max_tokens);
        let top_n = request.top_n_full_text.unwrap_or(config.top_n_full_text);
        let payload = self.context.build(&merged, max_tokens, top_n);
        let rendered = context::render(&payload);

        diagnostics.accepted_results = payload.result_count();
        diagnostics.tokens_used = payload.total_tokens;
        diagnostics.token_budget = config.effective_limit(max_tokens);
        events::context_assembled(&diagnostics);
        self.collector().retrieval.record(&diagnostics);
        debug!(%request_id, rendered_chars = rendered.len(), "request complete");

        Ok(RetrievalOutput {
            plan,
            payload,
            rendered,
            diagnostics,
        })
    }
}
