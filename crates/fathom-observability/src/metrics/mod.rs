//! Metrics registry.

pub mod retrieval_metrics;

pub use retrieval_metrics::RetrievalMetrics;

/// Owns the metric collectors.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub retrieval: RetrievalMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a point-in-time snapshot.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
