use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph expansion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// When false the pipeline runs vector-only.
    pub enabled: bool,
    /// Per-hop score decay: `decay^distance`.
    pub distance_decay: f64,
    /// Nodes with fewer properties than this are hydrated.
    pub sparse_min_properties: usize,
    /// Boost when a node's name/title overlaps an extracted name.
    pub name_match_boost: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_GRAPH_ENABLED,
            distance_decay: defaults::DEFAULT_DISTANCE_DECAY,
            sparse_min_properties: defaults::DEFAULT_SPARSE_MIN_PROPERTIES,
            name_match_boost: defaults::DEFAULT_NAME_MATCH_BOOST,
        }
    }
}

/// Result merger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Added to the best source score when both sources found the entity.
    pub same_entity_boost: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            same_entity_boost: defaults::DEFAULT_SAME_ENTITY_BOOST,
        }
    }
}
