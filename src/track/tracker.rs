use std::collections::HashMap;

use crate::schedule::organizer::Organizer;
use crate::track::node::{Annotation, DependencyRef, NodeId, TestNode, TestPath};
use crate::track::outcome::{Phase, PhaseOutcome};
use crate::track::resolve::{self, Decision};
use crate::track::scope::{ScopeError, ScopeKind, ScopeRegistry};

/// Host-owned configuration read by the tracking core.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Track every test, even without a dependency declaration.
    pub auto_track: bool,
    /// Treat unresolvable dependency names as satisfied.
    pub ignore_unknown: bool,
}

/// What the host hands over when a test is discovered.
#[derive(Debug, Clone)]
pub struct TestDescriptor {
    pub path: TestPath,
    pub annotation: Option<Annotation>,
}

impl TestDescriptor {
    pub fn new(path: TestPath, annotation: Option<Annotation>) -> Self {
        Self { path, annotation }
    }
}

/// Run-scoped dependency tracking state.
///
/// Owns the test node arena, the per-namespace scope registries, and the
/// configuration. One tracker per run; the host driver owns it and threads
/// it through discovery, phase recording, and the pre-execution gate.
#[derive(Debug, Default)]
pub struct Tracker {
    config: Config,
    nodes: Vec<TestNode>,
    index: HashMap<String, NodeId>,
    scopes: HashMap<(ScopeKind, String), ScopeRegistry>,
}

impl Tracker {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Observe a discovered test.
    ///
    /// A test is tracked when it carries an annotation or auto-tracking is
    /// on; otherwise `Ok(None)` and nothing is recorded. A tracked test is
    /// created once and registered into every enclosing namespace's
    /// registry; observing the same identity again returns the existing
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::DuplicateName`] when a registered name is
    /// already taken by a different test in the same namespace. Earlier
    /// registrations of the same call are kept; the offending one is not.
    pub fn observe(&mut self, descriptor: &TestDescriptor) -> Result<Option<NodeId>, ScopeError> {
        let key = descriptor.path.canonical();
        if let Some(&id) = self.index.get(&key) {
            return Ok(Some(id));
        }

        let annotation = match &descriptor.annotation {
            Some(annotation) => annotation.clone(),
            None if self.config.auto_track => Annotation::default(),
            None => return Ok(None),
        };

        let id = NodeId(self.nodes.len());
        let node = TestNode::new(descriptor.path.clone(), annotation);
        tracing::debug!(test = %node.path, display = %node.display_name(), "tracking test");

        for kind in ScopeKind::ALL {
            let Some(namespace) = node.path.namespace(kind) else {
                continue;
            };
            let registry = self
                .scopes
                .entry((kind, namespace.clone()))
                .or_insert_with(|| ScopeRegistry::new(kind, namespace));
            registry.register(&node.default_name(kind), id)?;
        }

        self.index.insert(key, id);
        self.nodes.push(node);
        Ok(Some(id))
    }

    /// Record a completed phase for a test. Untracked tests are ignored.
    pub fn after_phase(&mut self, path: &TestPath, phase: Phase, outcome: PhaseOutcome) {
        let Some(&id) = self.index.get(&path.canonical()) else {
            return;
        };
        tracing::debug!(test = %path, %phase, %outcome, "phase recorded");
        self.nodes[id.0].outcomes.record(phase, outcome);
    }

    /// The pre-execution gate: decide whether a test may run.
    ///
    /// Untracked tests always proceed.
    pub fn decide(&self, path: &TestPath) -> Decision {
        match self.lookup_path(path) {
            Some(id) => resolve::decide(self, id),
            None => Decision::Proceed,
        }
    }

    /// Gate against references declared at runtime, from inside a test,
    /// instead of (or in addition to) its annotation.
    ///
    /// Works for untracked tests too: resolution only needs the caller's
    /// position in the namespace tree.
    pub fn decide_on(&self, path: &TestPath, refs: &[DependencyRef]) -> Decision {
        match self.lookup_path(path) {
            Some(id) => resolve::decide_refs(self, self.node(id), refs),
            None => {
                let caller = TestNode::new(path.clone(), Annotation::default());
                resolve::decide_refs(self, &caller, refs)
            }
        }
    }

    /// Reorder candidates so dependencies run before dependents.
    pub fn organize(&self, candidates: Vec<NodeId>) -> Organizer<'_> {
        Organizer::new(self, candidates)
    }

    pub fn node(&self, id: NodeId) -> &TestNode {
        &self.nodes[id.0]
    }

    pub fn lookup_path(&self, path: &TestPath) -> Option<NodeId> {
        self.index.get(&path.canonical()).copied()
    }

    /// The registry a node resolves `kind`-scoped names in, if the node
    /// has an enclosing namespace of that kind and anything registered it.
    pub fn registry_for(&self, node: &TestNode, kind: ScopeKind) -> Option<&ScopeRegistry> {
        let namespace = node.path.namespace(kind)?;
        self.scopes.get(&(kind, namespace))
    }

    /// All tracked nodes, in observation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
