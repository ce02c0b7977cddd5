// Error types: token-level match failure and loader-time errors.

use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// A token (or some remainder of it) could not be resolved against the known
/// gismu and rafsi. Callers fall back to leaving the token unannotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("no gismu or rafsi matches {fragment:?} in {remainder:?}")]
pub struct MatchFailure {
    /// The suffix of the token being examined when matching failed.
    pub remainder: String,
    /// The piece that failed to resolve: the candidate rafsi when the affix
    /// lookup failed, otherwise the whole remainder.
    pub fragment: String,
}

impl MatchFailure {
    pub fn new(remainder: &str, fragment: &str) -> Self {
        Self {
            remainder: remainder.to_string(),
            fragment: fragment.to_string(),
        }
    }
}

/// Errors raised while building the lookup tables.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("unknown language code {0:?}")]
    UnknownLanguage(String),

    #[error("rafsi {rafsi:?} is claimed by both {first} and {second}")]
    DuplicateAffix {
        rafsi: String,
        first: String,
        second: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
