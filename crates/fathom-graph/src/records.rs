//! Conversion of graph nodes into store records.

use fathom_core::constants::record_keys as keys;
use fathom_core::models::{GraphNode, GraphRecord};
use serde_json::Value;

use crate::traversal::Reached;

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// Record for a node-lookup row.
pub fn node_record(node: &GraphNode) -> GraphRecord {
    let mut record = GraphRecord::new();
    record.insert(keys::NODE_ID.into(), Value::String(node.node_id.clone()));
    record.insert(keys::ENTITY_ID.into(), Value::String(node.entity_id.clone()));
    record.insert(keys::ENTITY_TYPE.into(), Value::String(node.entity_type.clone()));
    record.insert(keys::LABELS.into(), string_array(&node.labels));
    record.insert(
        keys::PROPERTIES.into(),
        Value::Object(node.properties.clone().into_iter().collect()),
    );
    record.insert(keys::WORKFLOW_ID.into(), Value::String(node.workflow_id.clone()));
    record
}

/// Record for an expansion row: the node plus its distance and path.
pub fn expansion_record(node: &GraphNode, reached: &Reached) -> GraphRecord {
    let mut record = node_record(node);
    record.insert(keys::DISTANCE.into(), Value::from(reached.distance as u64));
    record.insert(
        keys::RELATIONSHIP_PATH.into(),
        string_array(&reached.relationship_path),
    );
    record
}
