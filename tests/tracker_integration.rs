//! End-to-end simulation of a host runner driving the tracking core:
//! discovery, the execution-order hook, the pre-execution gate, and phase
//! recording, all against one run-scoped tracker.

use std::collections::HashMap;

use tether::schedule::organizer::DiagnosticKind;
use tether::track::node::{Annotation, DependencyRef, DependsOn, NodeId, TestPath};
use tether::track::outcome::{Phase, PhaseOutcome};
use tether::track::resolve::Decision;
use tether::track::scope::ScopeKind;
use tether::track::tracker::{Config, TestDescriptor, Tracker};

/// One test as the host sees it: identity, declaration, and what its main
/// phase would report if it ran.
struct HostTest {
    path: TestPath,
    annotation: Option<Annotation>,
    main_outcome: PhaseOutcome,
}

impl HostTest {
    fn passing(path: TestPath, annotation: Option<Annotation>) -> Self {
        Self {
            path,
            annotation,
            main_outcome: PhaseOutcome::Passed,
        }
    }

    fn failing(path: TestPath, annotation: Option<Annotation>) -> Self {
        Self {
            path,
            annotation,
            main_outcome: PhaseOutcome::Failed,
        }
    }
}

fn depends_on(names: &[&str]) -> Annotation {
    Annotation {
        depends: Some(DependsOn::List(
            names
                .iter()
                .map(|name| DependencyRef::new(ScopeKind::File, *name))
                .collect(),
        )),
        ..Annotation::default()
    }
}

/// Drive a full run: discover everything, reorder, then execute each test
/// through the gate. Returns the executed order of display names and the
/// skip reason (if any) per test.
fn run_suite(config: Config, tests: Vec<HostTest>) -> (Vec<String>, HashMap<String, Option<String>>) {
    let mut tracker = Tracker::new(config);
    let mut outcomes = HashMap::new();
    let mut candidates = Vec::new();

    for test in &tests {
        outcomes.insert(test.path.canonical(), test.main_outcome);
        let descriptor = TestDescriptor::new(test.path.clone(), test.annotation.clone());
        if let Some(id) = tracker.observe(&descriptor).expect("registration succeeds") {
            candidates.push(id);
        }
    }

    let order: Vec<NodeId> = tracker.organize(candidates).collect();

    let mut executed = Vec::new();
    let mut decisions = HashMap::new();
    for id in order {
        let node = tracker.node(id);
        let name = node.display_name();
        let path = node.path.clone();
        executed.push(name.clone());

        match tracker.decide(&path) {
            Decision::Proceed => {
                tracker.after_phase(&path, Phase::Setup, PhaseOutcome::Passed);
                tracker.after_phase(&path, Phase::Main, outcomes[&path.canonical()]);
                tracker.after_phase(&path, Phase::Teardown, PhaseOutcome::Passed);
                decisions.insert(name, None);
            }
            Decision::Skip(reason) => {
                tracker.after_phase(&path, Phase::Setup, PhaseOutcome::Skipped);
                decisions.insert(name, Some(reason));
            }
        }
    }

    (executed, decisions)
}

fn path(test: &str) -> TestPath {
    TestPath::new("tests/suite.rs", test)
}

#[test]
fn chain_runs_in_dependency_order_and_nothing_skips() {
    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::passing(path("a"), Some(depends_on(&["b"]))),
            HostTest::passing(path("b"), Some(depends_on(&["c"]))),
            HostTest::passing(path("c"), Some(Annotation::default())),
        ],
    );
    assert_eq!(executed, vec!["c", "b", "a"]);
    assert!(decisions.values().all(Option::is_none));
}

#[test]
fn failure_skips_the_whole_downstream_chain() {
    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::failing(path("root"), Some(Annotation::default())),
            HostTest::passing(path("mid"), Some(depends_on(&["root"]))),
            HostTest::passing(path("leaf"), Some(depends_on(&["mid"]))),
        ],
    );
    assert_eq!(executed, vec!["root", "mid", "leaf"]);
    assert!(decisions["root"].is_none());
    assert_eq!(
        decisions["mid"].as_deref(),
        Some("mid depends on root, which did not pass")
    );
    // mid was skipped, so its verdict is false and leaf cascades.
    assert_eq!(
        decisions["leaf"].as_deref(),
        Some("leaf depends on mid, which did not pass")
    );
}

#[test]
fn circular_pair_is_ordered_once_and_both_skip_at_execution() {
    let mut tracker = Tracker::new(Config::default());
    let a = tracker
        .observe(&TestDescriptor::new(path("a"), Some(depends_on(&["b"]))))
        .unwrap()
        .unwrap();
    let b = tracker
        .observe(&TestDescriptor::new(path("b"), Some(depends_on(&["a"]))))
        .unwrap()
        .unwrap();

    let mut organizer = tracker.organize(vec![a, b]);
    let order: Vec<NodeId> = organizer.by_ref().collect();
    assert_eq!(order, vec![a, b]);
    assert_eq!(organizer.diagnostics().len(), 1);
    assert_eq!(
        organizer.diagnostics()[0].kind,
        DiagnosticKind::CircularDependencies
    );
    assert_eq!(organizer.diagnostics()[0].test, "a");

    // Neither dependency can ever pass, so both skip at execution time.
    for id in order {
        let node_path = tracker.node(id).path.clone();
        let decision = tracker.decide(&node_path);
        assert!(matches!(decision, Decision::Skip(_)));
        tracker.after_phase(&node_path, Phase::Setup, PhaseOutcome::Skipped);
    }
}

#[test]
fn unknown_dependency_orders_first_then_skip_cascades() {
    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::passing(path("a"), Some(depends_on(&["b"]))),
            HostTest::passing(path("b"), Some(depends_on(&["ghost"]))),
        ],
    );
    assert_eq!(executed, vec!["b", "a"]);
    assert_eq!(
        decisions["b"].as_deref(),
        Some("b depends on ghost, which does not exist")
    );
    assert_eq!(
        decisions["a"].as_deref(),
        Some("a depends on b, which did not pass")
    );
}

#[test]
fn ignore_unknown_lets_the_ghost_reference_pass() {
    let (executed, decisions) = run_suite(
        Config {
            ignore_unknown: true,
            ..Config::default()
        },
        vec![HostTest::passing(path("a"), Some(depends_on(&["ghost"])))],
    );
    assert_eq!(executed, vec!["a"]);
    assert!(decisions["a"].is_none());
}

#[test]
fn depends_on_all_skips_when_any_prior_test_failed() {
    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::passing(path("x"), Some(Annotation::default())),
            HostTest::failing(path("y"), Some(Annotation::default())),
            HostTest::passing(
                path("finale"),
                Some(Annotation {
                    depends: Some(DependsOn::All),
                    ..Annotation::default()
                }),
            ),
        ],
    );
    assert_eq!(executed, vec!["x", "y", "finale"]);
    assert_eq!(
        decisions["finale"].as_deref(),
        Some("finale depends on all previous tests passing (y failed)")
    );
}

#[test]
fn cross_file_dependency_resolves_at_run_scope() {
    let api = TestPath::new("tests/api.rs", "ping");
    let ui = TestPath::new("tests/ui.rs", "dashboard");
    let annotation = Annotation {
        depends: Some(DependsOn::List(vec![DependencyRef::new(
            ScopeKind::Run,
            "tests/api.rs::ping",
        )])),
        ..Annotation::default()
    };

    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::passing(ui.clone(), Some(annotation)),
            HostTest::passing(api.clone(), Some(Annotation::default())),
        ],
    );
    // The api test is pulled ahead of its cross-file dependent.
    assert_eq!(executed, vec!["ping", "dashboard"]);
    assert!(decisions["dashboard"].is_none());
}

#[test]
fn group_scope_names_resolve_within_the_group() {
    let open = TestPath::grouped("tests/session.rs", "Session", "open");
    let close = TestPath::grouped("tests/session.rs", "Session", "close");
    let annotation = Annotation {
        scope: ScopeKind::Group,
        depends: Some(DependsOn::List(vec![DependencyRef::new(
            ScopeKind::Group,
            "open",
        )])),
        ..Annotation::default()
    };

    let (executed, decisions) = run_suite(
        Config::default(),
        vec![
            HostTest::passing(close.clone(), Some(annotation)),
            HostTest::passing(
                open.clone(),
                Some(Annotation {
                    scope: ScopeKind::Group,
                    ..Annotation::default()
                }),
            ),
        ],
    );
    assert_eq!(executed, vec!["open", "close"]);
    assert!(decisions["close"].is_none());
}

#[test]
fn untracked_tests_pass_through_the_gate() {
    let mut tracker = Tracker::new(Config::default());
    let ghost = path("unannotated");
    let tracked = tracker
        .observe(&TestDescriptor::new(ghost.clone(), None))
        .unwrap();
    assert!(tracked.is_none());
    assert_eq!(tracker.decide(&ghost), Decision::Proceed);
}

#[test]
fn fresh_trackers_do_not_share_state() {
    let mut first = Tracker::new(Config::default());
    first
        .observe(&TestDescriptor::new(path("a"), Some(Annotation::default())))
        .unwrap();

    // A second run sees none of the first run's registrations.
    let mut second = Tracker::new(Config::default());
    let id = second
        .observe(&TestDescriptor::new(path("b"), Some(depends_on(&["a"]))))
        .unwrap()
        .unwrap();
    let node_path = second.node(id).path.clone();
    assert_eq!(
        second.decide(&node_path),
        Decision::Skip("b depends on a, which does not exist".into())
    );
}
