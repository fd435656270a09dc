//! # fathom-observability
//!
//! Structured tracing (JSON or human-readable, filtered by `FATHOM_LOG`),
//! span and event definitions for the retrieval pipeline, and per-intent
//! retrieval metrics aggregated from stage diagnostics.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsCollector, RetrievalMetrics};
pub use tracing_setup::{init_tracing, init_tracing_with_config, init_tracing_with_filter};
