use std::fmt;

/// Classification of manifest loading errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestErrorKind {
    /// The file could not be read.
    Io,
    /// The file is not valid YAML/JSON for the manifest model.
    Parse,
    /// The manifest parsed but violates a semantic rule.
    Invalid,
}

impl fmt::Display for ManifestErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "io error"),
            Self::Parse => write!(f, "parse error"),
            Self::Invalid => write!(f, "invalid manifest"),
        }
    }
}

/// An error encountered while loading a suite manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestError {
    pub kind: ManifestErrorKind,
    pub message: String,
}

impl ManifestError {
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ManifestErrorKind::Io,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ManifestErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ManifestErrorKind::Invalid,
            message: message.into(),
        }
    }
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ManifestError {}
