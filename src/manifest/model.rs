use serde::{Deserialize, Serialize};

use crate::track::outcome::PhaseOutcome;
use crate::track::scope::ScopeKind;

/// On-disk description of one run's candidate tests: the structured stand-in
/// for the host runner's discovery output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteManifest {
    pub suite: String,
    #[serde(default)]
    pub config: ConfigEntry,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Host configuration flags carried in the manifest.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(default)]
    pub auto_track: bool,
    #[serde(default)]
    pub ignore_unknown: bool,
}

/// One test file and its tests, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
}

/// One test: its name, optional enclosing group, optional dependency
/// declaration, and optionally the phase outcomes recorded for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<DependencyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<OutcomesEntry>,
}

/// The dependency declaration attached to a test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends: Option<DependsEntry>,
}

/// `depends: all` or an explicit reference list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsEntry {
    Keyword(String),
    List(Vec<RefEntry>),
}

/// A single dependency reference: a bare name resolved in the declaring
/// test's default scope, or a scope-qualified pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefEntry {
    Name(String),
    Qualified { scope: ScopeKind, name: String },
}

/// Recorded phase outcomes; omitted phases stay unknown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutcomesEntry {
    #[serde(default)]
    pub setup: PhaseOutcome,
    #[serde(default)]
    pub main: PhaseOutcome,
    #[serde(default)]
    pub teardown: PhaseOutcome,
}
