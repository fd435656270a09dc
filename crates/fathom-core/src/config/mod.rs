//! Engine configuration, loaded from TOML. Every section is `#[serde(default)]`
//! so partial files only override what they name.

pub mod context_config;
pub mod defaults;
pub mod embedding_config;
pub mod graph_config;
pub mod observability_config;
pub mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{FathomError, FathomResult};

pub use context_config::ContextConfig;
pub use embedding_config::EmbeddingConfig;
pub use graph_config::{GraphConfig, MergeConfig};
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FathomConfig {
    pub retrieval: RetrievalConfig,
    pub graph: GraphConfig,
    pub merge: MergeConfig,
    pub context: ContextConfig,
    pub embedding: EmbeddingConfig,
    pub observability: ObservabilityConfig,
}

impl FathomConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> FathomResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> FathomResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| FathomError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> FathomResult<()> {
        let margin = self.context.safety_margin;
        if !margin.is_finite() || margin <= 0.0 || margin > 1.0 {
            return Err(FathomError::ConfigError(format!(
                "context.safety_margin must be in (0, 1], got {margin}"
            )));
        }
        let decay = self.graph.distance_decay;
        if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
            return Err(FathomError::ConfigError(format!(
                "graph.distance_decay must be in (0, 1], got {decay}"
            )));
        }
        if self.retrieval.recency_window_days <= 0 {
            return Err(FathomError::ConfigError(
                "retrieval.recency_window_days must be positive".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(FathomError::ConfigError(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        if self.retrieval.max_query_variants == 0 {
            return Err(FathomError::ConfigError(
                "retrieval.max_query_variants must be at least 1".to_string(),
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(FathomError::ConfigError(
                "embedding.dimensions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
