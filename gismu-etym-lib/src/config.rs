// Annotator configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// English words that happen to parse as lujvo.
const FALSE_POSITIVES: &[&str] = &[
    "fenced", "frozen", "sudden", "tragic", "bitten", "banker", "protected", "container",
    "runner", "voiced", "millet", "filled", "gender", "voices", "trades", "manner", "prefer",
    "preferred", "number", "causal", "person", "serves", "perceives", "mitten", "mental",
    "places", "postum", "practices", "called", "cackle", "simple", "cursed",
];

/// Settings for marking up gismu and lujvo in running text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Shortest token (in code points) worth decomposing.
    pub min_length: usize,
    /// Tokens never decomposed.
    pub false_positives: BTreeSet<String>,
    /// Two-word idioms whose first word is left alone, e.g. "cmavo list".
    pub idioms: Vec<(String, String)>,
    /// Output document name; `%s` is replaced with the gismu's initial.
    pub document_pattern: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            min_length: 5,
            false_positives: FALSE_POSITIVES.iter().map(|w| w.to_string()).collect(),
            idioms: vec![("cmavo".to_string(), "list".to_string())],
            document_pattern: "%s.html".to_string(),
        }
    }
}

impl AnnotatorConfig {
    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Ok(serde_json::from_str(&s)?)
    }

    /// True if `word` is long enough and not a known false positive.
    pub fn is_eligible(&self, word: &str) -> bool {
        word.chars().count() >= self.min_length && !self.false_positives.contains(word)
    }

    /// True if `word` followed by the raw token `next` forms an idiom.
    pub fn is_idiom(&self, word: &str, next: Option<&str>) -> bool {
        let Some(next) = next else {
            return false;
        };
        self.idioms.iter().any(|(first, second)| first == word && second == next)
    }

    /// The document holding the entry for `gismu`.
    pub fn document_for(&self, gismu: &str) -> String {
        let initial: String = gismu.chars().take(1).collect();
        self.document_pattern.replace("%s", &initial)
    }
}
