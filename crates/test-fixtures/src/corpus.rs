//! Golden corpus: documents, extracted sections, embedded rows, entity
//! attribute sets and a graph snapshot for one or more workflows.

use std::collections::HashMap;
use std::sync::Arc;

use fathom_core::models::{FieldMap, SectionRecord, VectorCandidate};
use fathom_embeddings::HashingProvider;
use fathom_graph::{GraphSnapshot, InMemoryGraphStore};
use serde::Deserialize;

use crate::stores::{InMemoryDocumentStore, InMemoryExtractionStore, InMemoryVectorStore, VectorRow};

pub const POLICY_CORPUS: &str = "golden/retrieval/policy_corpus.json";

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFixture {
    pub document_id: String,
    pub name: String,
    /// Defaults to the corpus workflow.
    #[serde(default)]
    pub workflow_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorFixture {
    #[serde(flatten)]
    pub candidate: VectorCandidate,
    #[serde(default)]
    pub workflow_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityFixture {
    pub entity_type: String,
    pub key: String,
    pub fields: FieldMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    pub workflow_id: String,
    pub documents: Vec<DocumentFixture>,
    pub sections: Vec<SectionRecord>,
    pub vectors: Vec<VectorFixture>,
    #[serde(default)]
    pub entities: Vec<EntityFixture>,
    #[serde(default)]
    pub graph: GraphSnapshot,
}

/// Store handles built from a corpus.
#[derive(Clone)]
pub struct FixtureStores {
    pub vector_store: Arc<InMemoryVectorStore>,
    pub extraction_store: Arc<InMemoryExtractionStore>,
    pub document_store: Arc<InMemoryDocumentStore>,
    pub graph_store: Arc<InMemoryGraphStore>,
}

impl Corpus {
    /// Build in-memory stores. Vector rows are embedded with the hashing
    /// provider at `dimensions`, so a hashing query embedder matches them.
    ///
    /// # Panics
    /// Panics if the graph snapshot references unknown nodes.
    pub fn stores(&self, dimensions: usize) -> FixtureStores {
        let provider = HashingProvider::new(dimensions);
        let rows = self
            .vectors
            .iter()
            .map(|v| VectorRow {
                workflow_id: v.workflow_id.clone().unwrap_or_else(|| self.workflow_id.clone()),
                embedding: provider.vector(&v.candidate.content),
                candidate: v.candidate.clone(),
            })
            .collect();

        let entities: HashMap<(String, String), FieldMap> = self
            .entities
            .iter()
            .map(|e| ((e.entity_type.clone(), e.key.clone()), e.fields.clone()))
            .collect();

        let documents = self
            .documents
            .iter()
            .map(|d| {
                (
                    d.workflow_id.clone().unwrap_or_else(|| self.workflow_id.clone()),
                    d.document_id.clone(),
                    d.name.clone(),
                )
            })
            .collect();

        let graph_store = InMemoryGraphStore::from_snapshot(self.graph.clone())
            .unwrap_or_else(|e| panic!("invalid corpus graph: {e}"));

        FixtureStores {
            vector_store: Arc::new(InMemoryVectorStore::new(rows)),
            extraction_store: Arc::new(InMemoryExtractionStore::new(self.sections.clone(), entities)),
            document_store: Arc::new(InMemoryDocumentStore::new(documents)),
            graph_store: Arc::new(graph_store),
        }
    }
}
