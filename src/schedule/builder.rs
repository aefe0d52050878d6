use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::track::node::{DependsOn, NodeId};
use crate::track::resolve::resolve_ref;
use crate::track::tracker::Tracker;

/// One test in a constructed dependency graph.
#[derive(Debug, Clone)]
pub struct DepNode {
    pub id: NodeId,
    pub name: String,
}

/// An edge from a dependency to its dependent, labelled with the name the
/// dependent declared it under.
#[derive(Debug, Clone)]
pub struct DepEdge {
    pub reference: String,
}

/// A declared reference that resolved to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub test: String,
    pub reference: String,
}

/// A constructed dependency graph backed by petgraph.
///
/// Edges point dependency → dependent, so a topological order runs
/// dependencies first.
pub struct DepGraph {
    pub name: String,
    pub graph: DiGraph<DepNode, DepEdge>,
    pub node_indices: Vec<NodeIndex>,
    pub unresolved: Vec<UnresolvedRef>,
}

/// Build the dependency graph over a candidate list.
///
/// References resolving to tests outside the candidate list contribute no
/// edge; references resolving to nothing are collected in `unresolved`
/// (dropped entirely when ignore-unknown is set).
pub fn build(tracker: &Tracker, candidates: &[NodeId], name: &str) -> DepGraph {
    let mut graph = DiGraph::new();
    let mut index_of: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(candidates.len());
    let mut node_indices = Vec::with_capacity(candidates.len());
    let mut unresolved = Vec::new();

    for &id in candidates {
        let idx = graph.add_node(DepNode {
            id,
            name: tracker.node(id).display_name(),
        });
        index_of.insert(id, idx);
        node_indices.push(idx);
    }

    for &id in candidates {
        let node = tracker.node(id);
        match &node.annotation.depends {
            None => {}
            Some(DependsOn::All) => {
                let Some(registry) = tracker.registry_for(node, node.annotation.scope) else {
                    continue;
                };
                for (dep_name, dep) in registry.entries() {
                    if dep == id {
                        continue;
                    }
                    if let Some(&dep_idx) = index_of.get(&dep) {
                        graph.add_edge(
                            dep_idx,
                            index_of[&id],
                            DepEdge {
                                reference: dep_name.to_owned(),
                            },
                        );
                    }
                }
            }
            Some(DependsOn::List(refs)) => {
                for reference in refs {
                    match resolve_ref(tracker, node, reference) {
                        Some(dep) => {
                            if let Some(&dep_idx) = index_of.get(&dep) {
                                graph.add_edge(
                                    dep_idx,
                                    index_of[&id],
                                    DepEdge {
                                        reference: reference.name.clone(),
                                    },
                                );
                            }
                        }
                        None if tracker.config().ignore_unknown => {}
                        None => unresolved.push(UnresolvedRef {
                            test: node.display_name(),
                            reference: reference.name.clone(),
                        }),
                    }
                }
            }
        }
    }

    DepGraph {
        name: name.to_owned(),
        graph,
        node_indices,
        unresolved,
    }
}
