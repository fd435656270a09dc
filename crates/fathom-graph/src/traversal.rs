//! Bounded breadth-first expansion from seed nodes, ignoring edge direction.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::graph::PropertyGraph;

/// A node reached from a seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reached {
    pub index: NodeIndex,
    /// Hops from the nearest seed other than itself, always `>= 1`.
    pub distance: usize,
    /// Relationship types along the path, seed side first.
    pub relationship_path: Vec<String>,
}

/// Expand from `seed_node_ids` up to `max_depth` hops.
///
/// Every seed is searched on its own, so a seed is returned when another seed
/// reaches it. Each node is reported once, at its shortest distance. Only
/// edges whose relation is in `edge_types` are followed (any relation when
/// empty), and only nodes of `workflow_id` are visited. Output is ordered by
/// distance, ties in discovery order, and holds at most `limit` nodes.
pub fn expand(
    graph: &PropertyGraph,
    workflow_id: &str,
    seed_node_ids: &[String],
    max_depth: usize,
    edge_types: &[String],
    limit: usize,
) -> Vec<Reached> {
    if max_depth == 0 || limit == 0 {
        return Vec::new();
    }

    let mut seeds = Vec::new();
    for id in seed_node_ids {
        let Some(idx) = graph.get_node(id) else {
            continue;
        };
        let in_workflow = graph.node(idx).is_some_and(|n| n.workflow_id == workflow_id);
        if in_workflow && !seeds.contains(&idx) {
            seeds.push(idx);
        }
    }

    let mut reached: Vec<Reached> = Vec::new();
    let mut position: HashMap<NodeIndex, usize> = HashMap::new();
    for seed in seeds {
        for hit in bfs(graph, workflow_id, seed, max_depth, edge_types) {
            match position.get(&hit.index) {
                Some(&i) => {
                    if hit.distance < reached[i].distance {
                        reached[i] = hit;
                    }
                }
                None => {
                    position.insert(hit.index, reached.len());
                    reached.push(hit);
                }
            }
        }
    }

    reached.sort_by_key(|r| r.distance);
    reached.truncate(limit);
    reached
}

fn bfs(
    graph: &PropertyGraph,
    workflow_id: &str,
    seed: NodeIndex,
    max_depth: usize,
    edge_types: &[String],
) -> Vec<Reached> {
    let allowed = |relation: &str| {
        edge_types.is_empty() || edge_types.iter().any(|t| t.eq_ignore_ascii_case(relation))
    };

    let mut reached = Vec::new();
    let mut visited = HashSet::from([seed]);
    let mut queue = VecDeque::from([(seed, Vec::<String>::new())]);

    while let Some((current, path)) = queue.pop_front() {
        if path.len() >= max_depth {
            continue;
        }
        let edges = graph
            .graph
            .edges_directed(current, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .chain(
                graph
                    .graph
                    .edges_directed(current, Direction::Incoming)
                    .map(|e| (e.source(), e.weight())),
            );

        for (neighbor, weight) in edges {
            if !allowed(&weight.relation) || visited.contains(&neighbor) {
                continue;
            }
            let Some(node) = graph.node(neighbor) else {
                continue;
            };
            if node.workflow_id != workflow_id {
                continue;
            }
            visited.insert(neighbor);

            let mut next_path = path.clone();
            next_path.push(weight.relation.clone());
            reached.push(Reached {
                index: neighbor,
                distance: next_path.len(),
                relationship_path: next_path.clone(),
            });
            queue.push_back((neighbor, next_path));
        }
    }
    reached
}
