use std::path::{Path, PathBuf};

use crate::emit::dot::emit_dot;
use crate::emit::json::{emit_check_json, emit_order_json};
use crate::emit::mermaid::emit_mermaid;
use crate::emit::text::{format_check, format_order};
use crate::emit::yaml::{emit_check_yaml, emit_order_yaml};
use crate::manifest::load::{LoadedSuite, load_file};
use crate::report::{CheckEntry, CheckReport, CheckSummary, OrderEntry, OrderReport};
use crate::schedule::analysis::find_cycle;
use crate::schedule::builder::build;
use crate::track::node::{DependsOn, NodeId, TestNode};
use crate::track::outcome::{OutcomeLog, Phase, PhaseOutcome};
use crate::track::resolve::Decision;
use crate::track::tracker::{Config, Tracker};

fn load(file: &Path) -> Result<LoadedSuite, String> {
    load_file(file).map_err(|e| format!("{}: {e}", file.display()))
}

/// Observe every test of a suite, returning candidate ids in suite order.
fn observe_all(
    tracker: &mut Tracker,
    suite: &LoadedSuite,
    file: &Path,
) -> Result<Vec<NodeId>, String> {
    let mut candidates = Vec::new();
    for test in &suite.tests {
        if let Some(id) = tracker
            .observe(&test.descriptor)
            .map_err(|e| format!("{}: {e}", file.display()))?
        {
            candidates.push(id);
        }
    }
    Ok(candidates)
}

fn declared_references(node: &TestNode) -> Vec<String> {
    match &node.annotation.depends {
        None => Vec::new(),
        Some(DependsOn::All) => vec!["all".to_owned()],
        Some(DependsOn::List(refs)) => refs.iter().map(|r| r.name.clone()).collect(),
    }
}

fn write_or_return(output: Option<&PathBuf>, content: String, what: &str) -> Result<String, String> {
    if let Some(out_path) = output {
        std::fs::write(out_path, &content)
            .map_err(|e| format!("failed to write {}: {e}", out_path.display()))?;
        Ok(format!("{what} written to {}", out_path.display()))
    } else {
        Ok(content)
    }
}

/// Run the `order` command: reorder each suite so dependencies run before
/// dependents, and report the resulting sequence.
///
/// Scheduler diagnostics go to stderr; they are also carried in the report.
///
/// # Errors
///
/// Returns an error string if loading, registration, or emitting fails.
pub fn run_order(
    files: &[PathBuf],
    format: &str,
    output: Option<&PathBuf>,
) -> Result<String, String> {
    let mut all_output = String::new();

    for file in files {
        let suite = load(file)?;
        // Every manifest test is a scheduling candidate, annotated or not.
        let mut tracker = Tracker::new(Config {
            auto_track: true,
            ..suite.config
        });
        let candidates = observe_all(&mut tracker, &suite, file)?;

        let mut organizer = tracker.organize(candidates);
        let order: Vec<NodeId> = organizer.by_ref().collect();
        let diagnostics: Vec<String> =
            organizer.diagnostics().iter().map(ToString::to_string).collect();
        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }

        let report = OrderReport {
            suite: suite.name.clone(),
            total: order.len(),
            diagnostics,
            order: order
                .iter()
                .enumerate()
                .map(|(i, &id)| {
                    let node = tracker.node(id);
                    OrderEntry {
                        position: i + 1,
                        test: node.path.canonical(),
                        name: node.display_name(),
                        depends_on: declared_references(node),
                    }
                })
                .collect(),
        };

        let rendered = match format {
            "text" => format_order(&report),
            "yaml" => emit_order_yaml(&report)?,
            "json" => emit_order_json(&report)?,
            other => {
                return Err(format!(
                    "unknown format '{other}' (expected: text, yaml, json)"
                ));
            }
        };
        all_output.push_str(&rendered);
    }

    write_or_return(output, all_output, "report")
}

/// Run the `check` command: replay each suite's recorded outcomes through
/// the pre-execution gate in declaration order and report every decision.
///
/// A skipped test records a skipped setup phase, so later tests that
/// depend on it see a failed verdict.
///
/// # Errors
///
/// Returns an error string if loading, registration, or emitting fails.
pub fn run_check(
    files: &[PathBuf],
    format: &str,
    output: Option<&PathBuf>,
) -> Result<String, String> {
    let mut all_output = String::new();

    for file in files {
        let suite = load(file)?;
        let mut tracker = Tracker::new(suite.config);
        let mut results = Vec::new();

        for test in &suite.tests {
            let path = &test.descriptor.path;
            let tracked = tracker
                .observe(&test.descriptor)
                .map_err(|e| format!("{}: {e}", file.display()))?;

            let decision = tracker.decide(path);
            match &decision {
                Decision::Proceed => {
                    for &(phase, outcome) in &test.outcomes {
                        tracker.after_phase(path, phase, outcome);
                    }
                }
                Decision::Skip(_) => {
                    tracker.after_phase(path, Phase::Setup, PhaseOutcome::Skipped);
                }
            }

            let (name, passed) = match tracked {
                Some(id) => {
                    let node = tracker.node(id);
                    (node.display_name(), node.passed())
                }
                None => {
                    // Untracked tests keep their recorded verdict but are
                    // invisible to the registries.
                    let mut log = OutcomeLog::new();
                    for &(phase, outcome) in &test.outcomes {
                        log.record(phase, outcome);
                    }
                    (path.test.clone(), log.passed())
                }
            };

            let (decision_str, reason) = match decision {
                Decision::Proceed => ("run".to_owned(), None),
                Decision::Skip(reason) => ("skip".to_owned(), Some(reason)),
            };
            results.push(CheckEntry {
                test: path.canonical(),
                name,
                decision: decision_str,
                reason,
                passed,
            });
        }

        let run = results.iter().filter(|r| r.decision == "run").count();
        let report = CheckReport {
            suite: suite.name.clone(),
            summary: CheckSummary {
                total: results.len(),
                run,
                skipped: results.len() - run,
            },
            results,
        };

        let rendered = match format {
            "text" => format_check(&report),
            "yaml" => emit_check_yaml(&report)?,
            "json" => emit_check_json(&report)?,
            other => {
                return Err(format!(
                    "unknown format '{other}' (expected: text, yaml, json)"
                ));
            }
        };
        all_output.push_str(&rendered);
    }

    write_or_return(output, all_output, "report")
}

/// Run the `graph` command: emit each suite's dependency graph as a
/// diagram.
///
/// # Errors
///
/// Returns an error string if loading, registration, or emitting fails.
pub fn run_graph(
    files: &[PathBuf],
    format: &str,
    output: Option<&PathBuf>,
) -> Result<String, String> {
    let mut all_output = String::new();

    for file in files {
        let suite = load(file)?;
        let mut tracker = Tracker::new(Config {
            auto_track: true,
            ..suite.config
        });
        let candidates = observe_all(&mut tracker, &suite, file)?;
        let dg = build(&tracker, &candidates, &suite.name);

        let diagram = match format {
            "dot" => emit_dot(&dg),
            "mermaid" => emit_mermaid(&dg),
            other => return Err(format!("unknown format '{other}' (expected: dot, mermaid)")),
        };
        all_output.push_str(&diagram);
    }

    write_or_return(output, all_output, "diagram")
}

/// Run the `validate` command: load suite manifests, register every test,
/// and report counts plus unresolvable references and cycles.
///
/// # Errors
///
/// Returns an error string if loading or registration fails.
pub fn run_validate(files: &[PathBuf]) -> Result<String, String> {
    let mut lines = Vec::new();

    for file in files {
        let suite = load(file)?;
        let mut tracker = Tracker::new(suite.config);
        let candidates = observe_all(&mut tracker, &suite, file)?;
        let dg = build(&tracker, &candidates, &suite.name);

        lines.push(format!(
            "{}: {} is valid ({} tests, {} tracked, {} dependency edges)",
            file.display(),
            suite.name,
            suite.tests.len(),
            candidates.len(),
            dg.graph.edge_count(),
        ));

        for unresolved in &dg.unresolved {
            lines.push(format!(
                "warning: {} depends on {}, which does not resolve",
                unresolved.test, unresolved.reference
            ));
        }
        if let Some(cycle) = find_cycle(&dg) {
            lines.push(format!(
                "warning: circular dependency: {}",
                cycle.join(" -> ")
            ));
        }
    }

    Ok(lines.join("\n") + "\n")
}
