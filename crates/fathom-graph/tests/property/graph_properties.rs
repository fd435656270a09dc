use std::collections::HashSet;

use fathom_core::models::GraphNode;
use fathom_graph::{expand, PropertyGraph};
use proptest::prelude::*;

const RELATIONS: [&str; 3] = ["HAS_COVERAGE", "HAS_EXCLUSION", "MODIFIES"];

fn build(n: usize, edges: &[(usize, usize, usize)]) -> PropertyGraph {
    let mut graph = PropertyGraph::new();
    for i in 0..n {
        graph.insert_node(GraphNode {
            node_id: format!("n{i}"),
            entity_id: format!("e{i}"),
            entity_type: "coverage".to_string(),
            labels: Vec::new(),
            properties: Default::default(),
            workflow_id: "wf".to_string(),
        });
    }
    for &(a, b, r) in edges {
        if a < n && b < n && a != b {
            graph
                .connect(&format!("n{a}"), &format!("n{b}"), RELATIONS[r % RELATIONS.len()])
                .unwrap();
        }
    }
    graph
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0..n, 0..n, 0..3usize), 0..n * 3)
}

proptest! {
    #[test]
    fn distances_within_bounds_and_nodes_unique(
        max_depth in 1usize..5,
        limit in 1usize..30,
        seed in 0usize..12,
        edges in edge_strategy(12),
    ) {
        let graph = build(12, &edges);
        let seeds = vec![format!("n{seed}")];
        let reached = expand(&graph, "wf", &seeds, max_depth, &[], limit);

        prop_assert!(reached.len() <= limit);
        let mut seen = HashSet::new();
        for r in &reached {
            prop_assert!(r.distance >= 1 && r.distance <= max_depth);
            prop_assert_eq!(r.relationship_path.len(), r.distance);
            prop_assert!(seen.insert(r.index), "node reported twice");
            prop_assert_ne!(graph.node(r.index).unwrap().node_id.clone(), seeds[0].clone());
        }
    }

    #[test]
    fn output_is_breadth_first(
        seed in 0usize..10,
        edges in edge_strategy(10),
    ) {
        let graph = build(10, &edges);
        let reached = expand(&graph, "wf", &[format!("n{seed}")], 4, &[], 100);
        for pair in reached.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn edge_filter_is_respected(
        seed in 0usize..10,
        edges in edge_strategy(10),
    ) {
        let graph = build(10, &edges);
        let allowed = vec!["MODIFIES".to_string()];
        let reached = expand(&graph, "wf", &[format!("n{seed}")], 3, &allowed, 100);
        for r in &reached {
            prop_assert!(r.relationship_path.iter().all(|rel| rel == "MODIFIES"));
        }
    }
}
