//! Sparse-node detection and hydration from the extraction store.

use fathom_core::constants::{
    DESCRIPTION_FALLBACK_KEYS, DESCRIPTION_KEYS, HYDRATION_KEY_PROPERTIES, SPARSE_ENTITY_TYPES,
};
use fathom_core::models::{format_scalar, FieldMap, GraphTraversalResult};
use fathom_core::traits::IExtractionStore;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

fn has_text(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !format_scalar(v).trim().is_empty())
}

/// A node needs hydration when its type usually carries only a reference and
/// it has no description-like property, or when it has too few properties.
pub fn is_sparse(result: &GraphTraversalResult, min_properties: usize) -> bool {
    let sparse_type = SPARSE_ENTITY_TYPES.contains(&result.entity_type.as_str());
    let described = DESCRIPTION_KEYS
        .iter()
        .any(|k| has_text(result.properties.get(*k)));
    (sparse_type && !described) || result.properties.len() < min_properties
}

/// Stable key used for the extraction lookup. Falls back to the entity id.
pub fn hydration_key(result: &GraphTraversalResult) -> &str {
    HYDRATION_KEY_PROPERTIES
        .iter()
        .find_map(|k| result.property_str(k))
        .unwrap_or(result.entity_id.as_str())
}

/// New result with `fields` added under keys the node does not already have.
/// A missing `description` is backfilled from the first alternate text field,
/// and missing document/section metadata from the fetched fields.
pub fn merge_properties(result: &GraphTraversalResult, fields: &FieldMap) -> GraphTraversalResult {
    let mut merged = result.clone();
    for (key, value) in fields {
        merged
            .properties
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }

    if !has_text(merged.properties.get("description")) {
        let fallback = DESCRIPTION_FALLBACK_KEYS
            .iter()
            .find_map(|k| merged.properties.get(*k).filter(|v| has_text(Some(*v))))
            .cloned();
        if let Some(value) = fallback {
            merged.properties.insert("description".to_string(), value);
        }
    }

    let field_str = |key: &str| match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };
    if merged.document_id.is_none() {
        merged.document_id = field_str("document_id");
    }
    if merged.section_type.is_none() {
        merged.section_type = field_str("section_type");
    }
    if merged.canonical_entity_id.is_none() {
        merged.canonical_entity_id = field_str("canonical_entity_id");
    }
    merged
}

/// Hydrate sparse results in parallel. Order is preserved; failed or empty
/// lookups leave the result unchanged. Returns the results and how many
/// were hydrated.
pub fn hydrate(
    store: &dyn IExtractionStore,
    results: Vec<GraphTraversalResult>,
    min_properties: usize,
) -> (Vec<GraphTraversalResult>, usize) {
    let hydrated: Vec<(GraphTraversalResult, bool)> = results
        .into_par_iter()
        .map(|result| {
            if !is_sparse(&result, min_properties) {
                return (result, false);
            }
            let key = hydration_key(&result);
            match store.get_entity_by_key(&result.entity_type, key) {
                Ok(Some(fields)) if !fields.is_empty() => (merge_properties(&result, &fields), true),
                Ok(_) => (result, false),
                Err(e) => {
                    warn!(
                        entity_type = %result.entity_type,
                        key,
                        error = %e,
                        "hydration lookup failed"
                    );
                    (result, false)
                }
            }
        })
        .collect();

    let count = hydrated.iter().filter(|(_, h)| *h).count();
    debug!(hydrated = count, total = hydrated.len(), "sparse node hydration");
    (hydrated.into_iter().map(|(r, _)| r).collect(), count)
}
