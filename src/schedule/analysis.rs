use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;

use crate::schedule::builder::DepGraph;

/// Returns `true` if the dependency graph contains a cycle.
pub fn has_cycle(dg: &DepGraph) -> bool {
    toposort(&dg.graph, None).is_err()
}

/// Find a cycle in the graph, returning the test names along the cycle
/// path. Returns `None` if the graph is acyclic.
pub fn find_cycle(dg: &DepGraph) -> Option<Vec<String>> {
    use std::collections::HashSet;

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    let mut stack_path = Vec::new();

    for &start in &dg.node_indices {
        if !visited.contains(&start)
            && let Some(cycle) =
                dfs_find_cycle(dg, start, &mut visited, &mut in_stack, &mut stack_path)
        {
            return Some(cycle);
        }
    }

    None
}

fn dfs_find_cycle(
    dg: &DepGraph,
    node: NodeIndex,
    visited: &mut std::collections::HashSet<NodeIndex>,
    in_stack: &mut std::collections::HashSet<NodeIndex>,
    stack_path: &mut Vec<NodeIndex>,
) -> Option<Vec<String>> {
    visited.insert(node);
    in_stack.insert(node);
    stack_path.push(node);

    for neighbor in dg.graph.neighbors_directed(node, Direction::Outgoing) {
        if !visited.contains(&neighbor) {
            if let Some(cycle) = dfs_find_cycle(dg, neighbor, visited, in_stack, stack_path) {
                return Some(cycle);
            }
        } else if in_stack.contains(&neighbor) {
            // Found cycle — extract it from the stack
            let cycle_start = stack_path.iter().position(|&n| n == neighbor).unwrap();
            let cycle: Vec<String> = stack_path[cycle_start..]
                .iter()
                .map(|&idx| dg.graph[idx].name.clone())
                .collect();
            return Some(cycle);
        }
    }

    stack_path.pop();
    in_stack.remove(&node);
    None
}

/// Tests nothing depends on within the candidate list (no incoming edges).
pub fn root_nodes(dg: &DepGraph) -> Vec<NodeIndex> {
    dg.node_indices
        .iter()
        .filter(|&&idx| {
            dg.graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
        })
        .copied()
        .collect()
}

/// Tests that no other candidate depends on (no outgoing edges).
pub fn leaf_nodes(dg: &DepGraph) -> Vec<NodeIndex> {
    dg.node_indices
        .iter()
        .filter(|&&idx| {
            dg.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .next()
                .is_none()
        })
        .copied()
        .collect()
}
