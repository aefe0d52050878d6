use std::collections::HashSet;
use std::path::Path;

use crate::manifest::error::ManifestError;
use crate::manifest::model::{DependencyEntry, DependsEntry, RefEntry, SuiteManifest};
use crate::track::node::{Annotation, DependencyRef, DependsOn, TestPath};
use crate::track::outcome::{Phase, PhaseOutcome};
use crate::track::scope::ScopeKind;
use crate::track::tracker::{Config, TestDescriptor};

/// A manifest converted into core discovery inputs, in declaration order.
#[derive(Debug, Clone)]
pub struct LoadedSuite {
    pub name: String,
    pub config: Config,
    pub tests: Vec<SuiteTest>,
}

/// One test's discovery descriptor plus its recorded phase outcomes.
#[derive(Debug, Clone)]
pub struct SuiteTest {
    pub descriptor: TestDescriptor,
    pub outcomes: Vec<(Phase, PhaseOutcome)>,
}

/// Load a suite manifest from disk; `.json` files are parsed as JSON,
/// everything else as YAML.
///
/// # Errors
///
/// Returns a [`ManifestError`] when the file cannot be read, does not
/// parse, or violates a semantic rule (duplicate entries, bad keywords).
pub fn load_file(path: &Path) -> Result<LoadedSuite, ManifestError> {
    let input = std::fs::read_to_string(path)
        .map_err(|e| ManifestError::io(format!("failed to read {}: {e}", path.display())))?;
    let json = path.extension().is_some_and(|ext| ext == "json");
    parse(&input, json)
}

/// Parse manifest text in the given format and convert it to core inputs.
///
/// # Errors
///
/// See [`load_file`].
pub fn parse(input: &str, json: bool) -> Result<LoadedSuite, ManifestError> {
    let manifest: SuiteManifest = if json {
        serde_json::from_str(input).map_err(|e| ManifestError::parse(e.to_string()))?
    } else {
        serde_yaml::from_str(input).map_err(|e| ManifestError::parse(e.to_string()))?
    };
    convert(&manifest)
}

fn convert(manifest: &SuiteManifest) -> Result<LoadedSuite, ManifestError> {
    let config = Config {
        auto_track: manifest.config.auto_track,
        ignore_unknown: manifest.config.ignore_unknown,
    };

    let mut seen = HashSet::new();
    let mut tests = Vec::new();
    for file in &manifest.files {
        for entry in &file.tests {
            let path = TestPath {
                file: file.path.clone(),
                group: entry.group.clone(),
                test: entry.name.clone(),
            };
            if !seen.insert(path.canonical()) {
                return Err(ManifestError::invalid(format!(
                    "duplicate test entry \"{}\"",
                    path.canonical()
                )));
            }

            let annotation = entry
                .dependency
                .as_ref()
                .map(|dependency| convert_dependency(dependency, &path))
                .transpose()?;

            let outcomes = entry
                .outcomes
                .map(|o| {
                    vec![
                        (Phase::Setup, o.setup),
                        (Phase::Main, o.main),
                        (Phase::Teardown, o.teardown),
                    ]
                })
                .unwrap_or_default();

            tests.push(SuiteTest {
                descriptor: TestDescriptor::new(path, annotation),
                outcomes,
            });
        }
    }

    Ok(LoadedSuite {
        name: manifest.suite.clone(),
        config,
        tests,
    })
}

fn convert_dependency(
    entry: &DependencyEntry,
    path: &TestPath,
) -> Result<Annotation, ManifestError> {
    let scope = entry.scope.unwrap_or(ScopeKind::File);
    let depends = match &entry.depends {
        None => None,
        Some(DependsEntry::Keyword(word)) if word == "all" => Some(DependsOn::All),
        Some(DependsEntry::Keyword(word)) => {
            return Err(ManifestError::invalid(format!(
                "test \"{}\": unknown depends keyword \"{word}\" (expected: all)",
                path.canonical()
            )));
        }
        Some(DependsEntry::List(refs)) => Some(DependsOn::List(
            refs.iter()
                .map(|reference| match reference {
                    RefEntry::Name(name) => DependencyRef::new(scope, name.clone()),
                    RefEntry::Qualified { scope, name } => {
                        DependencyRef::new(*scope, name.clone())
                    }
                })
                .collect(),
        )),
    };

    Ok(Annotation {
        name: entry.name.clone(),
        scope,
        depends,
    })
}
