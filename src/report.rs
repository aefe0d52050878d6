use serde::{Deserialize, Serialize};

/// Serializable result of ordering one suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReport {
    pub suite: String,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
    pub order: Vec<OrderEntry>,
}

/// One emitted position in the organized order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEntry {
    pub position: usize,
    pub test: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// Serializable result of replaying one suite's recorded outcomes through
/// the pre-execution gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub suite: String,
    pub summary: CheckSummary,
    pub results: Vec<CheckEntry>,
}

/// Per-suite decision counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total: usize,
    pub run: usize,
    pub skipped: usize,
}

/// One test's gate decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEntry {
    pub test: String,
    pub name: String,
    pub decision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub passed: bool,
}
