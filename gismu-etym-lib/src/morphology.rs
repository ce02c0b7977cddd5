// Lujvo decomposition.
//
// A token is split left to right into rafsi, four-letter long forms of gismu
// glued with {y}, and at most one trailing full gismu. Each step consumes a
// non-empty prefix, so recursion always terminates. There is no backtracking:
// the first applicable rule decides, and any failure fails the whole token.

use tracing::trace;

use crate::dictionary::Dictionary;
use crate::error::MatchFailure;
use crate::types::*;

// ---------------------------------------------------------------------------
// Shape constants
// ---------------------------------------------------------------------------

/// Hyphen letter inserted between pieces of a lujvo.
pub const GLUE: char = 'y';

const GISMU_LEN: usize = 5;
// Shortest remainder that can still hold a rafsi.
const MIN_REMAINDER: usize = 3;
// Long form (4) + glue (1) + at least one rafsi (3).
const MIN_LONG_FORM_WORD: usize = 8;
const LONG_FORM_LEN: usize = 4;
// Final vowels tried, in priority order, when restoring a long form.
const LONG_FORM_VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decompose `word` into gismu and rafsi spans.
///
/// On success the span texts, with a {y} re-inserted after every span whose
/// `glue` flag is set, concatenate back to `word`.
pub fn decompose(word: &str, dict: &Dictionary) -> Result<Vec<Span>, MatchFailure> {
    let mut spans = Vec::new();
    match decompose_into(word, dict, &mut spans) {
        Ok(()) => Ok(spans),
        Err(failure) => {
            trace!(word, fragment = %failure.fragment, "no decomposition");
            Err(failure)
        }
    }
}

fn decompose_into(s: &str, dict: &Dictionary, spans: &mut Vec<Span>) -> Result<(), MatchFailure> {
    let len = s.chars().count();

    if len < MIN_REMAINDER {
        return Err(MatchFailure::new(s, s));
    }

    if len == GISMU_LEN && dict.is_root(s) {
        spans.push(Span {
            text: s.to_string(),
            gismu: s.to_string(),
            kind: MatchKind::Root,
            glue: false,
        });
        return Ok(());
    }

    if len >= MIN_LONG_FORM_WORD && nth_char(s, LONG_FORM_LEN) == Some(GLUE) {
        let (prefix, rest) = split_chars(s, LONG_FORM_LEN);
        let rest = &rest[GLUE.len_utf8()..];
        for vowel in LONG_FORM_VOWELS {
            let gismu = format!("{prefix}{vowel}");
            if dict.is_root(&gismu) {
                spans.push(Span {
                    text: prefix.to_string(),
                    gismu,
                    kind: MatchKind::Root,
                    glue: true,
                });
                return decompose_into(rest, dict, spans);
            }
        }
        return Err(MatchFailure::new(s, s));
    }

    // CVC and CCV rafsi are three letters; CV'V rafsi carry an apostrophe
    // in third position and are four.
    let rafsi_len = if nth_char(s, 2) == Some('\'') { 4 } else { 3 };
    let (rafsi, rest) = split_chars(s, rafsi_len);
    let Some(gismu) = dict.rafsi_root(rafsi) else {
        return Err(MatchFailure::new(s, rafsi));
    };
    spans.push(Span {
        text: rafsi.to_string(),
        gismu: gismu.to_string(),
        kind: MatchKind::Affix,
        glue: false,
    });

    if rest.is_empty() {
        return Ok(());
    }

    let rest = match rest.strip_prefix(GLUE) {
        Some(after_glue) => {
            if let Some(last) = spans.last_mut() {
                last.glue = true;
            }
            after_glue
        }
        None => rest,
    };
    decompose_into(rest, dict, spans)
}

// ---------------------------------------------------------------------------
// Code-point helpers
// ---------------------------------------------------------------------------

fn nth_char(s: &str, n: usize) -> Option<char> {
    s.chars().nth(n)
}

/// Split after the first `n` code points (or at the end if shorter).
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    let at = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(gismu: &str, rafsi: &[&str]) -> RootWord {
        RootWord {
            gismu: gismu.to_string(),
            rafsi: rafsi.iter().map(|r| r.to_string()).collect(),
            ..RootWord::default()
        }
    }

    fn dict() -> Dictionary {
        Dictionary::from_roots([
            root("klama", &["kla"]),
            root("tcana", &["tca"]),
            root("zbasu", &["zba"]),
            root("lojbo", &["jbo", "lo'o"]),
            root("gerku", &["ger", "ge'u"]),
            root("tadni", &["tad"]),
            root("jufra", &["juf", "ju'a"]),
        ])
        .unwrap()
    }

    fn texts(spans: &[Span]) -> Vec<(&str, &str)> {
        spans
            .iter()
            .map(|s| (s.text.as_str(), s.gismu.as_str()))
            .collect()
    }

    #[test]
    fn test_bare_gismu() {
        let spans = decompose("klama", &dict()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, MatchKind::Root);
        assert_eq!(spans[0].gismu, "klama");
        assert!(!spans[0].glue);
    }

    #[test]
    fn test_long_form_then_gismu() {
        let spans = decompose("klamytcana", &dict()).unwrap();
        assert_eq!(texts(&spans), [("klam", "klama"), ("tcana", "tcana")]);
        assert_eq!(spans[0].kind, MatchKind::Root);
        assert!(spans[0].glue);
        assert_eq!(spans[1].kind, MatchKind::Root);
    }

    #[test]
    fn test_rafsi_chain() {
        let spans = decompose("zbajbo", &dict()).unwrap();
        assert_eq!(texts(&spans), [("zba", "zbasu"), ("jbo", "lojbo")]);
        assert!(spans.iter().all(|s| s.kind == MatchKind::Affix));
    }

    #[test]
    fn test_glue_between_rafsi() {
        let spans = decompose("tadyjbo", &dict()).unwrap();
        assert_eq!(texts(&spans), [("tad", "tadni"), ("jbo", "lojbo")]);
        assert!(spans[0].glue);
        assert!(!spans[1].glue);
    }

    #[test]
    fn test_long_form_then_rafsi() {
        let spans = decompose("gerkyzba", &dict()).unwrap();
        assert_eq!(texts(&spans), [("gerk", "gerku"), ("zba", "zbasu")]);
        assert_eq!(spans[0].kind, MatchKind::Root);
        assert_eq!(spans[1].kind, MatchKind::Affix);
    }

    #[test]
    fn test_apostrophe_rafsi() {
        let spans = decompose("lo'ojufra", &dict()).unwrap();
        assert_eq!(texts(&spans), [("lo'o", "lojbo"), ("jufra", "jufra")]);
        assert_eq!(spans[0].kind, MatchKind::Affix);
        assert_eq!(spans[1].kind, MatchKind::Root);
    }

    #[test]
    fn test_unknown_trailing_gismu() {
        let d = Dictionary::from_roots([root("klama", &["kla"])]).unwrap();
        let failure = decompose("klamytcana", &d).unwrap_err();
        assert_eq!(failure.remainder, "tcana");
        assert_eq!(failure.fragment, "tca");
    }

    #[test]
    fn test_long_form_without_root() {
        let failure = decompose("blabyzbasu", &dict()).unwrap_err();
        assert_eq!(failure.remainder, "blabyzbasu");
        assert_eq!(failure.fragment, "blabyzbasu");
    }

    #[test]
    fn test_short_remainder_fails() {
        let failure = decompose("klaj", &dict()).unwrap_err();
        assert_eq!(failure.remainder, "j");
        assert_eq!(failure.fragment, "j");
    }

    #[test]
    fn test_trailing_glue_fails() {
        let failure = decompose("zbay", &dict()).unwrap_err();
        assert_eq!(failure.remainder, "");
    }

    #[test]
    fn test_long_form_vowel_priority() {
        let d = Dictionary::from_roots([
            root("bangu", &[]),
            root("bangi", &[]),
            root("tcana", &["tca"]),
        ])
        .unwrap();
        // Vowels are tried in a, e, i, o, u order, so {bangi} wins.
        let spans = decompose("bangytca", &d).unwrap();
        assert_eq!(texts(&spans), [("bang", "bangi"), ("tca", "tcana")]);
    }

    #[test]
    fn test_long_form_needs_eight_letters() {
        // Seven letters: the long-form rule does not apply, so {klam} is
        // never restored and {kla} + {myt...} fails.
        let failure = decompose("klamyjb", &dict()).unwrap_err();
        assert_eq!(failure.fragment, "myj");
    }

    #[test]
    fn test_split_chars_multibyte() {
        assert_eq!(split_chars("äbcd", 2), ("äb", "cd"));
        assert_eq!(split_chars("ab", 4), ("ab", ""));
    }
}
