// Text annotation: split prose into tokens and decompose each eligible one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnnotatorConfig;
use crate::dictionary::Dictionary;
use crate::morphology;
use crate::types::Span;

/// One whitespace-separated token of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Leading characters outside {a-z}, e.g. an opening parenthesis.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub before: String,
    /// The word itself, as passed to the decomposer.
    pub word: String,
    /// Trailing characters outside {a-z}, e.g. punctuation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub after: String,
    /// Decomposition of `word`; empty if the word is left unmarked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<Span>,
}

impl AnnotatedToken {
    /// The token as it appeared in the input.
    pub fn raw(&self) -> String {
        format!("{}{}{}", self.before, self.word, self.after)
    }

    pub fn is_marked(&self) -> bool {
        !self.spans.is_empty()
    }
}

/// All tokens of an input text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub input: String,
    pub tokens: Vec<AnnotatedToken>,
}

/// Annotate every eligible word of `text` with its gismu/rafsi spans.
pub fn annotate(text: &str, dict: &Dictionary, config: &AnnotatorConfig) -> AnnotatedText {
    let raw_tokens: Vec<&str> = text.split_whitespace().collect();

    let tokens: Vec<AnnotatedToken> = raw_tokens
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let (before, word, after) = split_token(raw);
            // The idiom check compares against the next raw token, punctuation
            // included: "cmavo list." is not the idiom.
            let spans = if config.is_idiom(word, raw_tokens.get(i + 1).copied()) {
                Vec::new()
            } else {
                annotate_word(word, dict, config).unwrap_or_default()
            };
            AnnotatedToken {
                before: before.to_string(),
                word: word.to_string(),
                after: after.to_string(),
                spans,
            }
        })
        .collect();

    debug!(
        tokens = tokens.len(),
        marked = tokens.iter().filter(|t| t.is_marked()).count(),
        "annotated text"
    );

    AnnotatedText {
        input: text.to_string(),
        tokens,
    }
}

/// Decompose a single bare word if it is eligible. `None` means the word
/// stays unmarked.
pub fn annotate_word(word: &str, dict: &Dictionary, config: &AnnotatorConfig) -> Option<Vec<Span>> {
    if !config.is_eligible(word) {
        return None;
    }
    morphology::decompose(word, dict).ok()
}

/// Split a raw token into leading junk, the word, and trailing junk. Only
/// lowercase ASCII letters count as word characters at the edges; a token
/// with no such letter is all junk.
fn split_token(raw: &str) -> (&str, &str, &str) {
    let is_letter = |c: char| c.is_ascii_lowercase();
    let start = raw.find(is_letter).unwrap_or(raw.len());
    let end = raw.rfind(is_letter).map_or(start, |i| i + 1);
    (&raw[..start], &raw[start..end], &raw[end..])
}
