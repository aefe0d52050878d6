use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::track::node::NodeId;

/// The namespace level a name is registered and looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// The innermost group enclosing the test.
    Group,
    /// The file the test lives in.
    File,
    /// The whole run.
    Run,
}

impl ScopeKind {
    /// All scope kinds, innermost first.
    pub const ALL: [ScopeKind; 3] = [ScopeKind::Group, ScopeKind::File, ScopeKind::Run];
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::File => write!(f, "file"),
            Self::Run => write!(f, "run"),
        }
    }
}

/// Name table for one namespace node (one group, one file, or the run).
///
/// Maps registered names to test nodes. Lookup is exact-name; iteration
/// follows registration order, which "depends on all" relies on.
#[derive(Debug)]
pub struct ScopeRegistry {
    kind: ScopeKind,
    owner: String,
    lookup: HashMap<String, NodeId>,
    order: Vec<String>,
}

impl ScopeRegistry {
    pub fn new(kind: ScopeKind, owner: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            lookup: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The namespace node this registry belongs to (diagnostics only).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Look a name up in this namespace.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.lookup.get(name).copied()
    }

    /// Register `name` for `id`.
    ///
    /// Re-registering the same node under the same name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::DuplicateName`] when the name is already taken
    /// by a different node; the offending registration is not applied.
    pub fn register(&mut self, name: &str, id: NodeId) -> Result<(), ScopeError> {
        match self.lookup.get(name) {
            Some(&existing) if existing != id => Err(ScopeError::DuplicateName {
                name: name.to_owned(),
                scope: self.kind,
                owner: self.owner.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.lookup.insert(name.to_owned(), id);
                self.order.push(name.to_owned());
                Ok(())
            }
        }
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered (name, node) pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.lookup[name]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// An error raised while registering a test name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Two different tests claimed the same name in the same namespace.
    DuplicateName {
        name: String,
        scope: ScopeKind,
        owner: String,
    },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name, scope, owner } => {
                write!(
                    f,
                    "name \"{name}\" is already used by a different test in {scope} scope"
                )?;
                // The run namespace has no path of its own.
                if !owner.is_empty() {
                    write!(f, " \"{owner}\"")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ScopeError {}
