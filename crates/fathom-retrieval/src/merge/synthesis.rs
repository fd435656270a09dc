//! Readable content for graph-only results.

use fathom_core::constants::INTERNAL_PROPERTY_KEYS;
use fathom_core::models::{format_scalar, humanize_key, GraphTraversalResult};

/// Fields rendered first, in this order.
pub const PRIORITY_FIELDS: &[&str] = &[
    "name",
    "title",
    "description",
    "limit",
    "deductible",
    "value",
    "address",
    "text",
];

/// `Key: value` lines, priority fields first, then every other
/// non-internal property in key order. Falls back to
/// `"{entity_type} {entity_id}"` when nothing renders.
pub fn synthesize_content(result: &GraphTraversalResult) -> String {
    let mut lines = Vec::new();
    let mut push = |key: &str| {
        if let Some(value) = result.properties.get(key) {
            let rendered = format_scalar(value);
            if !rendered.trim().is_empty() {
                lines.push(format!("{}: {}", humanize_key(key), rendered.trim()));
            }
        }
    };

    for key in PRIORITY_FIELDS {
        push(key);
    }
    for key in result.properties.keys() {
        let key = key.as_str();
        if PRIORITY_FIELDS.contains(&key) || INTERNAL_PROPERTY_KEYS.contains(&key) {
            continue;
        }
        push(key);
    }

    if lines.is_empty() {
        format!("{} {}", result.entity_type, result.entity_id)
    } else {
        lines.join("\n")
    }
}

/// Pages from a `page_numbers` array or a single `page` property.
pub fn pages_from_properties(result: &GraphTraversalResult) -> Vec<u32> {
    let as_page = |v: &serde_json::Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
    if let Some(serde_json::Value::Array(items)) = result.properties.get("page_numbers") {
        return items.iter().filter_map(as_page).collect();
    }
    result
        .properties
        .get("page")
        .and_then(as_page)
        .map(|p| vec![p])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn result(properties: serde_json::Value) -> GraphTraversalResult {
        GraphTraversalResult {
            node_id: "n".into(),
            entity_id: "doc-1_limits_0".into(),
            canonical_entity_id: None,
            entity_type: "limit".into(),
            labels: vec![],
            properties: serde_json::from_value(properties).unwrap(),
            distance: 1,
            relationship_path: vec![],
            relevance_score: 0.9,
            document_id: Some("doc-1".into()),
            section_type: None,
        }
    }

    #[test]
    fn priority_fields_then_rest_without_internals() {
        let content = synthesize_content(&result(json!({
            "aggregate": "$2,000,000",
            "limit": "$1,000,000",
            "name": "Each Occurrence",
            "document_id": "doc-1",
            "source_key": "lim-1"
        })));
        assert_eq!(
            content,
            "Name: Each Occurrence\nLimit: $1,000,000\nAggregate: $2,000,000"
        );
    }

    #[test]
    fn empty_properties_fall_back_to_type_and_id() {
        assert_eq!(
            synthesize_content(&result(json!({"document_id": "doc-1"}))),
            "limit doc-1_limits_0"
        );
    }

    #[test]
    fn pages_from_array_or_scalar() {
        assert_eq!(pages_from_properties(&result(json!({"page_numbers": [3, 4]}))), vec![3, 4]);
        assert_eq!(pages_from_properties(&result(json!({"page": 7}))), vec![7]);
        assert!(pages_from_properties(&result(json!({}))).is_empty());
    }
}
