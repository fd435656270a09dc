//! Parsing of graph store records.

use fathom_core::constants::record_keys as keys;
use fathom_core::errors::GraphError;
use fathom_core::models::{GraphNode, GraphRecord, GraphTraversalResult, PropertyMap};
use serde_json::Value;

fn required_str(record: &GraphRecord, field: &str) -> Result<String, GraphError> {
    match record.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(GraphError::MalformedRecord {
            field: field.to_string(),
            reason: "missing or not a string".to_string(),
        }),
    }
}

fn string_list(record: &GraphRecord, field: &str) -> Vec<String> {
    match record.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn properties(record: &GraphRecord) -> PropertyMap {
    match record.get(keys::PROPERTIES) {
        Some(Value::Object(map)) => map.clone().into_iter().collect(),
        _ => PropertyMap::new(),
    }
}

fn property_string(properties: &PropertyMap, key: &str) -> Option<String> {
    match properties.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Entity type from the record column, else the node's properties.
fn entity_type(record: &GraphRecord, properties: &PropertyMap) -> String {
    required_str(record, keys::ENTITY_TYPE)
        .ok()
        .or_else(|| property_string(properties, "entity_type"))
        .unwrap_or_default()
}

pub fn parse_node(record: &GraphRecord) -> Result<GraphNode, GraphError> {
    let properties = properties(record);
    Ok(GraphNode {
        node_id: required_str(record, keys::NODE_ID)?,
        entity_id: required_str(record, keys::ENTITY_ID)?,
        entity_type: entity_type(record, &properties),
        labels: string_list(record, keys::LABELS),
        workflow_id: required_str(record, keys::WORKFLOW_ID).unwrap_or_default(),
        properties,
    })
}

/// Traversal row. The relevance score is left at 0 for scoring to fill.
pub fn parse_traversal(record: &GraphRecord) -> Result<GraphTraversalResult, GraphError> {
    let properties = properties(record);
    let distance = record
        .get(keys::DISTANCE)
        .and_then(Value::as_u64)
        .ok_or_else(|| GraphError::MalformedRecord {
            field: keys::DISTANCE.to_string(),
            reason: "missing or not a non-negative integer".to_string(),
        })? as usize;

    Ok(GraphTraversalResult {
        node_id: required_str(record, keys::NODE_ID)?,
        entity_id: required_str(record, keys::ENTITY_ID)?,
        canonical_entity_id: property_string(&properties, "canonical_entity_id"),
        entity_type: entity_type(record, &properties),
        labels: string_list(record, keys::LABELS),
        distance,
        relationship_path: string_list(record, keys::RELATIONSHIP_PATH),
        relevance_score: 0.0,
        document_id: property_string(&properties, "document_id"),
        section_type: property_string(&properties, "section_type"),
        properties,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> GraphRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn traversal_row_reads_metadata_from_properties() {
        let parsed = parse_traversal(&record(json!({
            "node_id": "4:abc:12",
            "entity_id": "doc-1_exclusions_0",
            "entity_type": "exclusion",
            "labels": ["Exclusion"],
            "properties": {
                "document_id": "doc-1",
                "section_type": "exclusions",
                "canonical_entity_id": "flood-exclusion",
                "title": "Flood"
            },
            "distance": 2,
            "relationship_path": ["HAS_COVERAGE", "HAS_EXCLUSION"]
        })))
        .unwrap();

        assert_eq!(parsed.distance, 2);
        assert_eq!(parsed.document_id.as_deref(), Some("doc-1"));
        assert_eq!(parsed.section_type.as_deref(), Some("exclusions"));
        assert_eq!(parsed.canonical_entity_id.as_deref(), Some("flood-exclusion"));
        assert_eq!(parsed.relationship_path.len(), 2);
    }

    #[test]
    fn missing_distance_is_malformed() {
        let err = parse_traversal(&record(json!({ "node_id": "n", "entity_id": "e" }))).unwrap_err();
        assert!(matches!(err, GraphError::MalformedRecord { ref field, .. } if field == "distance"));
    }

    #[test]
    fn node_without_entity_id_is_malformed() {
        assert!(parse_node(&record(json!({ "node_id": "n" }))).is_err());
    }

    #[test]
    fn entity_type_falls_back_to_properties() {
        let node = parse_node(&record(json!({
            "node_id": "n", "entity_id": "e",
            "properties": { "entity_type": "limit" }
        })))
        .unwrap();
        assert_eq!(node.entity_type, "limit");
    }
}
