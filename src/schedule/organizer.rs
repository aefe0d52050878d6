use std::collections::HashMap;
use std::fmt;

use crate::track::node::NodeId;
use crate::track::resolve;
use crate::track::tracker::Tracker;

/// Scheduling state of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not yet considered.
    Pending,
    /// Considered this round, not ready.
    Waiting,
    /// Emitted.
    Pushed,
}

/// What went wrong while ordering a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownDependencies,
    CircularDependencies,
}

/// A degraded-ordering notice for one candidate.
///
/// The candidate is still emitted; the execution-time skip decision remains
/// the authority on whether it actually runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub test: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::UnknownDependencies => {
                write!(f, "{} has unknown dependencies", self.test)
            }
            DiagnosticKind::CircularDependencies => {
                write!(f, "{} has circular dependencies", self.test)
            }
        }
    }
}

/// Single-pass, lazy reordering of a candidate list so that dependencies
/// are emitted before their dependents.
///
/// Each `next()` scans the remaining candidates in original order and emits
/// the first ready one. When nothing is ready the organizer degrades
/// instead of stopping: a candidate with an unresolvable reference is
/// emitted under an "unknown dependencies" diagnostic, and a pure ordering
/// cycle emits its first member under a "circular dependencies" diagnostic.
/// Every candidate is emitted exactly once.
pub struct Organizer<'a> {
    tracker: &'a Tracker,
    candidates: Vec<NodeId>,
    states: HashMap<NodeId, State>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Organizer<'a> {
    pub fn new(tracker: &'a Tracker, candidates: Vec<NodeId>) -> Self {
        let mut unique = Vec::with_capacity(candidates.len());
        let mut states = HashMap::with_capacity(candidates.len());
        for id in candidates {
            if states.insert(id, State::Pending).is_none() {
                unique.push(id);
            }
        }
        Self {
            tracker,
            candidates: unique,
            states,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics recorded so far. Complete once iteration has finished.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn remaining(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.candidates
            .iter()
            .copied()
            .filter(|id| self.states[id] != State::Pushed)
    }

    /// A candidate is ready when every dependency that resolves to a
    /// candidate has already been emitted. Dependencies resolving outside
    /// the candidate list never block; an unresolvable reference does.
    fn is_ready(&self, id: NodeId) -> bool {
        match resolve::resolved_dependencies(self.tracker, id) {
            Err(_) => false,
            Ok(deps) => deps.into_iter().all(|dep| {
                self.states
                    .get(&dep)
                    .is_none_or(|&state| state == State::Pushed)
            }),
        }
    }

    fn has_unknown(&self, id: NodeId) -> bool {
        resolve::resolved_dependencies(self.tracker, id).is_err()
    }

    fn push(&mut self, id: NodeId) -> NodeId {
        self.states.insert(id, State::Pushed);
        id
    }

    fn diagnose(&mut self, id: NodeId, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            test: self.tracker.node(id).display_name(),
            kind,
        };
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

impl Iterator for Organizer<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let remaining: Vec<NodeId> = self.remaining().collect();
        if remaining.is_empty() {
            return None;
        }

        for &id in &remaining {
            if self.is_ready(id) {
                return Some(self.push(id));
            }
            self.states.insert(id, State::Waiting);
        }

        for &id in &remaining {
            if self.has_unknown(id) {
                self.diagnose(id, DiagnosticKind::UnknownDependencies);
                return Some(self.push(id));
            }
        }

        let id = remaining[0];
        self.diagnose(id, DiagnosticKind::CircularDependencies);
        Some(self.push(id))
    }
}
