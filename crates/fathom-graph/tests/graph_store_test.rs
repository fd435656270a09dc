use std::collections::BTreeMap;

use fathom_core::constants::record_keys as keys;
use fathom_core::models::{GraphNode, GraphQuery, QueryShape};
use fathom_core::traits::IGraphStore;
use fathom_graph::{EdgeSpec, GraphSnapshot, InMemoryGraphStore, PropertyGraph};
use serde_json::{json, Value};

fn node(id: &str, entity_type: &str, workflow: &str) -> GraphNode {
    GraphNode {
        node_id: id.to_string(),
        entity_id: format!("ent-{id}"),
        entity_type: entity_type.to_string(),
        labels: vec![entity_type.to_string()],
        properties: BTreeMap::from([("name".to_string(), json!(format!("Node {id}")))]),
        workflow_id: workflow.to_string(),
    }
}

fn edge(source: &str, target: &str, relation: &str) -> EdgeSpec {
    EdgeSpec {
        source: source.to_string(),
        target: target.to_string(),
        relation: relation.to_string(),
    }
}

/// policy -HAS_COVERAGE-> cov -HAS_EXCLUSION-> exc -MODIFIES- end (end points at exc)
/// plus a shortcut policy -HAS_ENDORSEMENT-> end, and a node in another workflow.
fn store() -> InMemoryGraphStore {
    let snapshot = GraphSnapshot {
        nodes: vec![
            node("policy", "policy", "wf-1"),
            node("cov", "coverage", "wf-1"),
            node("exc", "exclusion", "wf-1"),
            node("end", "endorsement", "wf-1"),
            node("other", "coverage", "wf-2"),
        ],
        edges: vec![
            edge("policy", "cov", "HAS_COVERAGE"),
            edge("cov", "exc", "HAS_EXCLUSION"),
            edge("end", "exc", "MODIFIES"),
            edge("policy", "end", "HAS_ENDORSEMENT"),
            edge("cov", "other", "SAME_AS"),
        ],
    };
    InMemoryGraphStore::from_snapshot(snapshot).unwrap()
}

fn expand_query(seeds: &[&str], max_depth: usize, edge_types: &[&str], limit: usize) -> GraphQuery {
    GraphQuery {
        cypher: String::new(),
        params: BTreeMap::new(),
        shape: QueryShape::Expand {
            workflow_id: "wf-1".to_string(),
            seed_node_ids: seeds.iter().map(|s| s.to_string()).collect(),
            max_depth,
            edge_types: edge_types.iter().map(|s| s.to_string()).collect(),
            limit,
        },
    }
}

fn ids_and_distances(records: &[BTreeMap<String, Value>]) -> Vec<(String, u64)> {
    records
        .iter()
        .map(|r| {
            (
                r[keys::NODE_ID].as_str().unwrap().to_string(),
                r[keys::DISTANCE].as_u64().unwrap(),
            )
        })
        .collect()
}

#[test]
fn node_lookup_returns_workflow_nodes_in_request_order() {
    let store = store();
    let query = GraphQuery {
        cypher: String::new(),
        params: BTreeMap::new(),
        shape: QueryShape::NodeLookup {
            workflow_id: "wf-1".to_string(),
            entity_ids: vec!["ent-exc".into(), "ent-other".into(), "ent-cov".into()],
        },
    };
    let records = store.run_query(&query).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r[keys::NODE_ID].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["exc", "cov"]);
    assert_eq!(records[0][keys::PROPERTIES]["name"], json!("Node exc"));
    assert_eq!(records[0][keys::LABELS], json!(["exclusion"]));
}

#[test]
fn depth_one_only_reaches_neighbours() {
    let records = store().run_query(&expand_query(&["cov"], 1, &[], 100)).unwrap();
    let mut found = ids_and_distances(&records);
    found.sort();
    assert_eq!(
        found,
        vec![("exc".to_string(), 1), ("policy".to_string(), 1)]
    );
}

#[test]
fn edges_are_followed_in_both_directions() {
    let records = store()
        .run_query(&expand_query(&["exc"], 1, &["MODIFIES"], 100))
        .unwrap();
    assert_eq!(ids_and_distances(&records), vec![("end".to_string(), 1)]);
    assert_eq!(records[0][keys::RELATIONSHIP_PATH], json!(["MODIFIES"]));
}

#[test]
fn shortest_distance_is_kept() {
    // end is 2 hops via policy and 2 hops via exc; exc is 2 hops via cov.
    let records = store().run_query(&expand_query(&["policy"], 3, &[], 100)).unwrap();
    let found = ids_and_distances(&records);
    assert_eq!(found.len(), 3);
    let exc = found.iter().find(|(id, _)| id == "exc").unwrap();
    assert_eq!(exc.1, 2);
    let end = found.iter().find(|(id, _)| id == "end").unwrap();
    assert_eq!(end.1, 1);
}

#[test]
fn edge_filter_restricts_paths() {
    let records = store()
        .run_query(&expand_query(&["policy"], 3, &["HAS_COVERAGE", "HAS_EXCLUSION"], 100))
        .unwrap();
    let found = ids_and_distances(&records);
    assert_eq!(
        found,
        vec![("cov".to_string(), 1), ("exc".to_string(), 2)]
    );
    assert_eq!(
        records[1][keys::RELATIONSHIP_PATH],
        json!(["HAS_COVERAGE", "HAS_EXCLUSION"])
    );
}

#[test]
fn other_workflows_are_never_reached() {
    let records = store().run_query(&expand_query(&["cov"], 3, &[], 100)).unwrap();
    assert!(records
        .iter()
        .all(|r| r[keys::WORKFLOW_ID].as_str() == Some("wf-1")));
}

#[test]
fn limit_caps_results() {
    let records = store().run_query(&expand_query(&["policy"], 3, &[], 2)).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn unknown_seeds_yield_nothing() {
    let records = store().run_query(&expand_query(&["nope"], 3, &[], 10)).unwrap();
    assert!(records.is_empty());
}

#[test]
fn snapshot_deserializes_from_json() {
    let snapshot: GraphSnapshot = serde_json::from_value(json!({
        "nodes": [{
            "node_id": "n1", "entity_id": "e1", "entity_type": "limit",
            "labels": ["Limit"], "properties": {"value": 1000000}, "workflow_id": "wf"
        }]
    }))
    .unwrap();
    let graph = PropertyGraph::from_snapshot(snapshot).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn seeds_reach_each_other() {
    let records = store()
        .run_query(&expand_query(&["policy", "cov"], 1, &[], 100))
        .unwrap();
    let mut found = ids_and_distances(&records);
    found.sort();
    assert_eq!(
        found,
        vec![
            ("cov".to_string(), 1),
            ("end".to_string(), 1),
            ("exc".to_string(), 1),
            ("policy".to_string(), 1),
        ]
    );
}
