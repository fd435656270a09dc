// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 20;
pub const DEFAULT_ENTITY_BOOST: f64 = 0.10;
/// Fraction of the entity boost added for coverage hits when the query named
/// a coverage type.
pub const COVERAGE_BOOST_RATIO: f64 = 0.5;
pub const DEFAULT_RECENCY_MAX_BOOST: f64 = 0.05;
pub const DEFAULT_RECENCY_WINDOW_DAYS: i64 = 365;
pub const DEFAULT_MAX_QUERY_VARIANTS: usize = 5;

// --- Graph ---
pub const DEFAULT_GRAPH_ENABLED: bool = true;
pub const DEFAULT_DISTANCE_DECAY: f64 = 0.9;
pub const DEFAULT_SPARSE_MIN_PROPERTIES: usize = 3;
pub const DEFAULT_NAME_MATCH_BOOST: f64 = 0.10;

// --- Merge ---
pub const DEFAULT_SAME_ENTITY_BOOST: f64 = 0.10;

// --- Context ---
pub const DEFAULT_MAX_TOKENS: usize = 8_000;
pub const DEFAULT_TOP_N_FULL_TEXT: usize = 5;
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.95;
pub const DEFAULT_ENTRY_OVERHEAD_TOKENS: usize = 20;
pub const DEFAULT_SUMMARY_SNIPPET_CHARS: usize = 200;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_TOKEN_CACHE_SIZE: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
