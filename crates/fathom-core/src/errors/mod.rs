mod embedding_error;
mod graph_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use graph_error::GraphError;
pub use store_error::StoreError;

/// Result alias used across the workspace.
pub type FathomResult<T> = Result<T, FathomError>;

/// Top-level error for the Fathom engine.
///
/// Store, embedding and graph failures are normally swallowed at the
/// component boundary and turned into empty results; they only surface
/// through this type from the collaborator traits themselves.
#[derive(Debug, thiserror::Error)]
pub enum FathomError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("request cancelled during {stage}")]
    Cancelled { stage: String },

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("tokenizer error: {0}")]
    TokenizerError(String),
}

impl FathomError {
    /// Whether the error came from an upstream collaborator (store, graph,
    /// embedding provider) rather than from the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::StoreError(_) | Self::EmbeddingError(_) | Self::GraphError(_)
        )
    }
}

impl From<serde_json::Error> for FathomError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for FathomError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
