use std::fmt;

use crate::track::node::{DependencyRef, DependsOn, NodeId, TestNode};
use crate::track::tracker::Tracker;

/// Outcome of the pre-execution gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// The host must skip the test and surface the reason verbatim.
    Skip(String),
}

impl Decision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// A dependency reference that does not resolve in its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub name: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency \"{}\" does not resolve", self.name)
    }
}

impl std::error::Error for NotFound {}

/// Resolve one reference against the registry of its scope.
pub fn resolve_ref(tracker: &Tracker, node: &TestNode, reference: &DependencyRef) -> Option<NodeId> {
    tracker
        .registry_for(node, reference.scope)?
        .resolve(&reference.name)
}

/// Resolve a node's declared dependencies to concrete nodes.
///
/// With ignore-unknown set, unresolvable references are dropped instead of
/// erroring. "Depends on all" resolves to every other entry registered so
/// far in the node's own default-scope registry.
///
/// # Errors
///
/// Returns [`NotFound`] for the first unresolvable reference in
/// declaration order (only when ignore-unknown is off).
pub fn resolved_dependencies(tracker: &Tracker, id: NodeId) -> Result<Vec<NodeId>, NotFound> {
    let node = tracker.node(id);
    match &node.annotation.depends {
        None => Ok(Vec::new()),
        Some(DependsOn::All) => {
            let Some(registry) = tracker.registry_for(node, node.annotation.scope) else {
                return Ok(Vec::new());
            };
            Ok(registry
                .entries()
                .filter(|&(_, dep)| dep != id)
                .map(|(_, dep)| dep)
                .collect())
        }
        Some(DependsOn::List(refs)) => {
            let mut resolved = Vec::with_capacity(refs.len());
            for reference in refs {
                match resolve_ref(tracker, node, reference) {
                    Some(dep) => resolved.push(dep),
                    None if tracker.config().ignore_unknown => {}
                    None => {
                        return Err(NotFound {
                            name: reference.name.clone(),
                        });
                    }
                }
            }
            Ok(resolved)
        }
    }
}

/// Decide whether a tracked test may run, given the outcomes recorded so
/// far. The first unsatisfied reference short-circuits the decision.
pub fn decide(tracker: &Tracker, id: NodeId) -> Decision {
    let node = tracker.node(id);
    match &node.annotation.depends {
        None => Decision::Proceed,
        Some(DependsOn::All) => decide_all(tracker, id, node),
        Some(DependsOn::List(refs)) => decide_refs(tracker, node, refs),
    }
}

fn decide_all(tracker: &Tracker, id: NodeId, node: &TestNode) -> Decision {
    let Some(registry) = tracker.registry_for(node, node.annotation.scope) else {
        return Decision::Proceed;
    };
    for (name, dep) in registry.entries() {
        if dep == id {
            continue;
        }
        if !tracker.node(dep).passed() {
            return Decision::Skip(format!(
                "{} depends on all previous tests passing ({name} failed)",
                node.display_name()
            ));
        }
    }
    Decision::Proceed
}

/// Decide against an explicit reference list, independent of the node's
/// declared dependencies. Backs runtime-declared constraints checked from
/// inside a running test.
pub fn decide_refs(tracker: &Tracker, node: &TestNode, refs: &[DependencyRef]) -> Decision {
    for reference in refs {
        match resolve_ref(tracker, node, reference) {
            Some(dep) => {
                let dep_node = tracker.node(dep);
                if !dep_node.passed() {
                    return Decision::Skip(format!(
                        "{} depends on {}, which did not pass",
                        node.display_name(),
                        dep_node.display_name()
                    ));
                }
            }
            None if tracker.config().ignore_unknown => {}
            None => {
                return Decision::Skip(format!(
                    "{} depends on {}, which does not exist",
                    node.display_name(),
                    reference.name
                ));
            }
        }
    }
    Decision::Proceed
}
