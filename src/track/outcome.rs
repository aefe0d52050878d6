use std::fmt;

use serde::{Deserialize, Serialize};

/// A lifecycle phase of a single test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Main,
    Teardown,
}

impl Phase {
    /// All phases, in lifecycle order.
    pub const ALL: [Phase; 3] = [Phase::Setup, Phase::Main, Phase::Teardown];

    fn index(self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Main => 1,
            Self::Teardown => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Main => write!(f, "main"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

/// The reported outcome of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseOutcome {
    #[default]
    Unknown,
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Per-test record of phase outcomes, reduced to a single verdict.
///
/// One log exists per test invocation. The host reports each phase as it
/// completes; a duplicate report for a phase overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeLog {
    results: [PhaseOutcome; 3],
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the outcome reported for a phase.
    pub fn record(&mut self, phase: Phase, outcome: PhaseOutcome) {
        self.results[phase.index()] = outcome;
    }

    /// The outcome currently recorded for a phase.
    pub fn outcome(&self, phase: Phase) -> PhaseOutcome {
        self.results[phase.index()]
    }

    /// The verdict: true iff every phase recorded `Passed`.
    ///
    /// An unrecorded phase is still `Unknown` and makes the verdict false.
    pub fn passed(&self) -> bool {
        self.results == [PhaseOutcome::Passed; 3]
    }
}

impl fmt::Display for OutcomeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "setup: {}, main: {}, teardown: {}",
            self.results[0], self.results[1], self.results[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_has_unknown_phases() {
        let log = OutcomeLog::new();
        for phase in Phase::ALL {
            assert_eq!(log.outcome(phase), PhaseOutcome::Unknown);
        }
        assert!(!log.passed());
    }

    #[test]
    fn all_phases_passed_is_a_pass() {
        let mut log = OutcomeLog::new();
        for phase in Phase::ALL {
            log.record(phase, PhaseOutcome::Passed);
        }
        assert!(log.passed());
    }

    #[test]
    fn failed_main_phase_fails_the_verdict() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Setup, PhaseOutcome::Passed);
        log.record(Phase::Main, PhaseOutcome::Failed);
        log.record(Phase::Teardown, PhaseOutcome::Passed);
        assert!(!log.passed());
    }

    #[test]
    fn skipped_phase_fails_the_verdict() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Setup, PhaseOutcome::Skipped);
        log.record(Phase::Main, PhaseOutcome::Passed);
        log.record(Phase::Teardown, PhaseOutcome::Passed);
        assert!(!log.passed());
    }

    #[test]
    fn unrecorded_phase_fails_the_verdict() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Setup, PhaseOutcome::Passed);
        log.record(Phase::Main, PhaseOutcome::Passed);
        assert!(!log.passed());
    }

    #[test]
    fn duplicate_record_overwrites() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Main, PhaseOutcome::Failed);
        log.record(Phase::Main, PhaseOutcome::Passed);
        assert_eq!(log.outcome(Phase::Main), PhaseOutcome::Passed);
    }

    #[test]
    fn record_order_does_not_matter() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Teardown, PhaseOutcome::Passed);
        log.record(Phase::Setup, PhaseOutcome::Passed);
        log.record(Phase::Main, PhaseOutcome::Passed);
        assert!(log.passed());
    }

    #[test]
    fn log_display_lists_phases() {
        let mut log = OutcomeLog::new();
        log.record(Phase::Setup, PhaseOutcome::Passed);
        assert_eq!(
            log.to_string(),
            "setup: passed, main: unknown, teardown: unknown"
        );
    }

    #[test]
    fn phase_and_outcome_display() {
        assert_eq!(Phase::Setup.to_string(), "setup");
        assert_eq!(Phase::Main.to_string(), "main");
        assert_eq!(Phase::Teardown.to_string(), "teardown");
        assert_eq!(PhaseOutcome::Unknown.to_string(), "unknown");
        assert_eq!(PhaseOutcome::Passed.to_string(), "passed");
    }
}
