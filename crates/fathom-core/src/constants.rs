/// Fathom engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Closed allow-list of section types produced by the extraction pipeline.
pub const SECTION_TYPES: &[&str] = &[
    "declarations",
    "coverages",
    "deductibles",
    "limits",
    "exclusions",
    "endorsements",
    "conditions",
    "definitions",
    "premium",
    "insured_parties",
    "locations",
    "loss_history",
];

/// Closed allow-list of entity types stored on vectors and graph nodes.
pub const ENTITY_TYPES: &[&str] = &[
    "policy",
    "coverage",
    "exclusion",
    "condition",
    "endorsement",
    "definition",
    "deductible",
    "limit",
    "insured",
    "location",
    "organization",
    "person",
    "premium",
];

/// Entity type that receives the extra coverage boost.
pub const COVERAGE_ENTITY_TYPE: &str = "coverage";

/// Entity types whose graph nodes usually carry only a reference and need
/// their description hydrated from the extraction store.
pub const SPARSE_ENTITY_TYPES: &[&str] = &["exclusion", "condition", "endorsement", "definition"];

/// Property keys that count as a description for sparse-node detection.
pub const DESCRIPTION_KEYS: &[&str] = &["description", "text", "summary", "content"];

/// Alternate fields a missing `description` is backfilled from, in order.
pub const DESCRIPTION_FALLBACK_KEYS: &[&str] = &["text", "summary", "content", "wording"];

/// Node properties holding the stable key used for hydration lookups.
pub const HYDRATION_KEY_PROPERTIES: &[&str] = &["source_key", "entity_key"];

/// Properties that never surface in synthesized content.
pub const INTERNAL_PROPERTY_KEYS: &[&str] = &[
    "node_id",
    "entity_id",
    "canonical_entity_id",
    "entity_type",
    "workflow_id",
    "document_id",
    "section_type",
    "embedding_id",
    "source_key",
    "entity_key",
    "created_at",
    "updated_at",
];

/// Rendered in place of a context block when nothing was retrieved.
pub const NO_RELEVANT_CONTEXT: &str = "No relevant context was found in the selected documents.";

/// Maximum number of extracted names considered for name-overlap boosting.
pub const MAX_NAME_HINTS: usize = 16;

/// Column aliases of graph store records. The Cypher builders `RETURN` these
/// names and the in-process store emits them.
pub mod record_keys {
    pub const NODE_ID: &str = "node_id";
    pub const ENTITY_ID: &str = "entity_id";
    pub const ENTITY_TYPE: &str = "entity_type";
    pub const LABELS: &str = "labels";
    pub const PROPERTIES: &str = "properties";
    pub const WORKFLOW_ID: &str = "workflow_id";
    pub const DISTANCE: &str = "distance";
    pub const RELATIONSHIP_PATH: &str = "relationship_path";
}
