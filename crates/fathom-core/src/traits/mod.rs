mod document_store;
mod embedding_provider;
mod entity_extractor;
mod extraction_store;
mod graph_store;
mod intent_classifier;
mod vector_store;

pub use document_store::IDocumentStore;
pub use embedding_provider::IEmbeddingProvider;
pub use entity_extractor::IEntityExtractor;
pub use extraction_store::IExtractionStore;
pub use graph_store::IGraphStore;
pub use intent_classifier::IIntentClassifier;
pub use vector_store::IVectorStore;
