use std::fmt;

use crate::track::outcome::OutcomeLog;
use crate::track::scope::ScopeKind;

/// Index of a test node in the tracker's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Stable identity of a host-runner test: its position in the namespace tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPath {
    pub file: String,
    pub group: Option<String>,
    pub test: String,
}

impl TestPath {
    pub fn new(file: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            group: None,
            test: test.into(),
        }
    }

    pub fn grouped(
        file: impl Into<String>,
        group: impl Into<String>,
        test: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            group: Some(group.into()),
            test: test.into(),
        }
    }

    /// The fully qualified form, unique across the run.
    pub fn canonical(&self) -> String {
        match &self.group {
            Some(group) => format!("{}::{}::{}", self.file, group, self.test),
            None => format!("{}::{}", self.file, self.test),
        }
    }

    /// The enclosing namespace node for a scope kind, or `None` when the
    /// test has no such node (a test outside any group has no group scope).
    pub fn namespace(&self, kind: ScopeKind) -> Option<String> {
        match kind {
            ScopeKind::Run => Some(String::new()),
            ScopeKind::File => Some(self.file.clone()),
            ScopeKind::Group => self
                .group
                .as_ref()
                .map(|group| format!("{}::{}", self.file, group)),
        }
    }
}

impl fmt::Display for TestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// A reference to another test, to be resolved in a particular scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    pub scope: ScopeKind,
    pub name: String,
}

impl DependencyRef {
    pub fn new(scope: ScopeKind, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }
}

/// The declared dependency set of a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependsOn {
    /// Every test registered so far in the declaring test's default scope
    /// must have passed.
    All,
    /// The named tests must have passed, checked in declaration order.
    List(Vec<DependencyRef>),
}

/// The structured dependency declaration attached to a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Explicit name; overrides every derived name in every scope.
    pub name: Option<String>,
    /// Default scope for unqualified dependency references.
    pub scope: ScopeKind,
    pub depends: Option<DependsOn>,
}

impl Default for Annotation {
    fn default() -> Self {
        Self {
            name: None,
            scope: ScopeKind::File,
            depends: None,
        }
    }
}

/// One tracked test: identity, declaration, and recorded outcomes.
#[derive(Debug, Clone)]
pub struct TestNode {
    pub path: TestPath,
    pub annotation: Annotation,
    pub outcomes: OutcomeLog,
}

impl TestNode {
    pub fn new(path: TestPath, annotation: Annotation) -> Self {
        Self {
            path,
            annotation,
            outcomes: OutcomeLog::new(),
        }
    }

    /// The name this test registers under in a given scope.
    ///
    /// An explicit declared name wins in every scope. Otherwise: the full
    /// path at run scope; the group-qualified name at file scope when the
    /// test belongs to a group; the bare test name everywhere else.
    pub fn default_name(&self, kind: ScopeKind) -> String {
        if let Some(name) = &self.annotation.name {
            return name.clone();
        }
        match kind {
            ScopeKind::Run => self.path.canonical(),
            ScopeKind::File => match &self.path.group {
                Some(group) => format!("{}::{}", group, self.path.test),
                None => self.path.test.clone(),
            },
            ScopeKind::Group => self.path.test.clone(),
        }
    }

    /// The name used in diagnostics and skip reasons. Never used for lookup.
    pub fn display_name(&self) -> String {
        self.default_name(self.annotation.scope)
    }

    /// The verdict over the recorded phase outcomes.
    pub fn passed(&self) -> bool {
        self.outcomes.passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::outcome::{Phase, PhaseOutcome};

    fn bare_node() -> TestNode {
        TestNode::new(
            TestPath::new("tests/auth.rs", "login"),
            Annotation::default(),
        )
    }

    fn grouped_node() -> TestNode {
        TestNode::new(
            TestPath::grouped("tests/auth.rs", "Session", "login"),
            Annotation::default(),
        )
    }

    #[test]
    fn canonical_path_without_group() {
        let path = TestPath::new("tests/auth.rs", "login");
        assert_eq!(path.canonical(), "tests/auth.rs::login");
    }

    #[test]
    fn canonical_path_with_group() {
        let path = TestPath::grouped("tests/auth.rs", "Session", "login");
        assert_eq!(path.canonical(), "tests/auth.rs::Session::login");
    }

    #[test]
    fn namespace_per_scope_kind() {
        let path = TestPath::grouped("tests/auth.rs", "Session", "login");
        assert_eq!(path.namespace(ScopeKind::Run).as_deref(), Some(""));
        assert_eq!(
            path.namespace(ScopeKind::File).as_deref(),
            Some("tests/auth.rs")
        );
        assert_eq!(
            path.namespace(ScopeKind::Group).as_deref(),
            Some("tests/auth.rs::Session")
        );
    }

    #[test]
    fn ungrouped_test_has_no_group_namespace() {
        let path = TestPath::new("tests/auth.rs", "login");
        assert!(path.namespace(ScopeKind::Group).is_none());
    }

    #[test]
    fn default_name_run_scope_is_full_path() {
        assert_eq!(
            grouped_node().default_name(ScopeKind::Run),
            "tests/auth.rs::Session::login"
        );
        assert_eq!(
            bare_node().default_name(ScopeKind::Run),
            "tests/auth.rs::login"
        );
    }

    #[test]
    fn default_name_file_scope_qualifies_group() {
        assert_eq!(grouped_node().default_name(ScopeKind::File), "Session::login");
        assert_eq!(bare_node().default_name(ScopeKind::File), "login");
    }

    #[test]
    fn default_name_group_scope_is_bare() {
        assert_eq!(grouped_node().default_name(ScopeKind::Group), "login");
    }

    #[test]
    fn explicit_name_overrides_every_scope() {
        let mut node = grouped_node();
        node.annotation.name = Some("session_login".into());
        for kind in ScopeKind::ALL {
            assert_eq!(node.default_name(kind), "session_login");
        }
        assert_eq!(node.display_name(), "session_login");
    }

    #[test]
    fn display_name_uses_default_scope() {
        // Default lookup scope is File, so the display name is the
        // file-scope derived name.
        assert_eq!(grouped_node().display_name(), "Session::login");
        assert_eq!(bare_node().display_name(), "login");
    }

    #[test]
    fn display_name_follows_declared_scope() {
        let mut node = grouped_node();
        node.annotation.scope = ScopeKind::Run;
        assert_eq!(node.display_name(), "tests/auth.rs::Session::login");
    }

    #[test]
    fn node_verdict_tracks_outcomes() {
        let mut node = bare_node();
        assert!(!node.passed());
        for phase in Phase::ALL {
            node.outcomes.record(phase, PhaseOutcome::Passed);
        }
        assert!(node.passed());
    }
}
