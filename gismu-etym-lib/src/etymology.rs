// Etymology ranking: score, filter, sort and deduplicate the source words
// proposed for one gismu, separately for each language.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::relevance;
use crate::types::*;

/// Normalise a raw record according to its language. Each source-word list
/// carries a different subset of columns; fields a language does not use
/// are cleared, and English words are their own translation. Records whose
/// comment marks them as doubtful get the `dubious` flag.
pub fn apply_language_defaults(mut word: SourceWord) -> SourceWord {
    match word.language {
        Language::Chinese => {
            word.class = None;
        }
        Language::Hindi => {
            word.alternative = None;
        }
        Language::Arabic | Language::Russian => {
            word.class = None;
            word.alternative = None;
        }
        Language::Spanish => {
            word.transliteration = None;
            word.class = None;
            word.alternative = None;
        }
        Language::English => {
            word.translation = word.sourceword.clone();
            word.transliteration = None;
            word.class = None;
            word.alternative = None;
        }
    }
    word.dubious = word.is_dubious();
    word
}

/// Set the relevance score of `word` against `gismu`. Records without a
/// transcription score zero.
pub fn score_source_word(gismu: &str, mut word: SourceWord) -> SourceWord {
    word.score = word
        .transcription
        .as_deref()
        .map_or(0, |t| relevance::score(gismu, t));
    word
}

/// Rank the already-scored source words of a single language: drop zero
/// scores, order by score (stable), keep the first of each native form.
pub fn rank_language(words: Vec<SourceWord>) -> Vec<SourceWord> {
    let mut kept: Vec<SourceWord> = words.into_iter().filter(|w| w.score > 0).collect();
    kept.sort_by(compare);

    let mut seen = HashSet::new();
    kept.retain(|w| match w.native() {
        Some(native) => seen.insert(native.to_string()),
        None => true,
    });
    kept
}

/// Rank scored source words of any languages, grouped per language in
/// display order. Languages with nothing left after filtering are omitted.
pub fn rank(words: impl IntoIterator<Item = SourceWord>) -> Vec<Etymology> {
    let mut by_language: BTreeMap<Language, Vec<SourceWord>> = BTreeMap::new();
    for word in words {
        by_language.entry(word.language).or_default().push(word);
    }

    by_language
        .into_iter()
        .map(|(language, words)| Etymology {
            language,
            rtl: language.is_rtl(),
            sourcewords: rank_language(words),
        })
        .filter(|e| !e.sourcewords.is_empty())
        .collect()
}

/// Normalise, score and rank the raw source words proposed for `gismu`.
pub fn rank_root(gismu: &str, words: impl IntoIterator<Item = SourceWord>) -> Vec<Etymology> {
    let scored: Vec<SourceWord> = words
        .into_iter()
        .map(|w| score_source_word(gismu, apply_language_defaults(w)))
        .collect();
    let total = scored.len();
    let ranked = rank(scored);
    debug!(
        gismu,
        candidates = total,
        kept = ranked.iter().map(|e| e.sourcewords.len()).sum::<usize>(),
        "ranked etymology"
    );
    ranked
}

/// Higher score first. `sort_by` is stable, so ties keep input order.
fn compare(a: &SourceWord, b: &SourceWord) -> Ordering {
    b.score.cmp(&a.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(language: Language, native: Option<&str>, score: u32) -> SourceWord {
        SourceWord {
            sourceword: native.map(str::to_string),
            score,
            ..SourceWord::new(language)
        }
    }

    fn natives(words: &[SourceWord]) -> Vec<(Option<&str>, u32)> {
        words.iter().map(|w| (w.native(), w.score)).collect()
    }

    #[test]
    fn test_rank_sorts_and_dedups() {
        let ranked = rank_language(vec![
            word(Language::Hindi, Some("A"), 5),
            word(Language::Hindi, Some("B"), 7),
            word(Language::Hindi, Some("A"), 9),
            word(Language::Hindi, Some("C"), 1),
        ]);
        assert_eq!(
            natives(&ranked),
            [(Some("A"), 9), (Some("B"), 7), (Some("C"), 1)]
        );
    }

    #[test]
    fn test_zero_scores_dropped() {
        let ranked = rank_language(vec![
            word(Language::Arabic, Some("A"), 0),
            word(Language::Arabic, Some("B"), 2),
        ]);
        assert_eq!(natives(&ranked), [(Some("B"), 2)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_language(vec![
            word(Language::Russian, Some("x"), 3),
            word(Language::Russian, Some("y"), 4),
            word(Language::Russian, Some("z"), 3),
        ]);
        assert_eq!(
            natives(&ranked),
            [(Some("y"), 4), (Some("x"), 3), (Some("z"), 3)]
        );
    }

    #[test]
    fn test_missing_native_forms_never_deduplicated() {
        let ranked = rank_language(vec![
            word(Language::Chinese, None, 4),
            word(Language::Chinese, Some(""), 4),
            word(Language::Chinese, None, 3),
        ]);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_rank_groups_by_language_in_display_order() {
        let ranked = rank(vec![
            word(Language::Spanish, Some("s"), 3),
            word(Language::Arabic, Some("a"), 3),
            word(Language::English, Some("e"), 0),
            word(Language::Chinese, Some("c"), 2),
        ]);
        let languages: Vec<_> = ranked.iter().map(|e| e.language).collect();
        assert_eq!(
            languages,
            [Language::Arabic, Language::Chinese, Language::Spanish]
        );
    }

    #[test]
    fn test_arabic_marked_right_to_left() {
        let ranked = rank(vec![
            word(Language::Arabic, Some("a"), 3),
            word(Language::Hindi, Some("h"), 3),
        ]);
        assert!(ranked[0].rtl);
        assert!(!ranked[1].rtl);
    }

    #[test]
    fn test_dubious_comment_flagged() {
        let ranked = rank_root(
            "klama",
            [
                SourceWord {
                    sourceword: Some("去".to_string()),
                    transcription: Some("kla".to_string()),
                    comment: Some("dubious".to_string()),
                    ..SourceWord::new(Language::Chinese)
                },
                SourceWord {
                    sourceword: Some("来".to_string()),
                    transcription: Some("lai".to_string()),
                    ..SourceWord::new(Language::Chinese)
                },
            ],
        );
        let flags: Vec<_> = ranked[0]
            .sourcewords
            .iter()
            .map(|w| (w.native(), w.dubious))
            .collect();
        assert_eq!(flags, [(Some("去"), true), (Some("来"), false)]);
    }

    #[test]
    fn test_language_defaults() {
        let raw = SourceWord {
            sourceword: Some("go".to_string()),
            transliteration: Some("go".to_string()),
            translation: Some("to go".to_string()),
            class: Some("x".to_string()),
            alternative: Some("y".to_string()),
            ..SourceWord::new(Language::English)
        };
        let en = apply_language_defaults(raw.clone());
        assert_eq!(en.translation.as_deref(), Some("go"));
        assert_eq!(en.transliteration, None);
        assert_eq!(en.class, None);
        assert_eq!(en.alternative, None);

        let hi = apply_language_defaults(SourceWord {
            language: Language::Hindi,
            ..raw.clone()
        });
        assert_eq!(hi.class.as_deref(), Some("x"));
        assert_eq!(hi.alternative, None);

        let zh = apply_language_defaults(SourceWord {
            language: Language::Chinese,
            ..raw.clone()
        });
        assert_eq!(zh.class, None);
        assert_eq!(zh.alternative.as_deref(), Some("y"));

        let es = apply_language_defaults(SourceWord {
            language: Language::Spanish,
            ..raw
        });
        assert_eq!(es.transliteration, None);
        assert_eq!(es.translation.as_deref(), Some("to go"));
    }

    #[test]
    fn test_rank_root_scores_transcriptions() {
        let klama = |native: &str, transcription: Option<&str>| SourceWord {
            sourceword: Some(native.to_string()),
            transcription: transcription.map(str::to_string),
            ..SourceWord::new(Language::Russian)
        };
        let ranked = rank_root(
            "klama",
            vec![
                klama("A", Some("klam")),
                klama("B", Some("kla")),
                klama("C", None),
                klama("D", Some("xyz")),
            ],
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(
            natives(&ranked[0].sourcewords),
            [(Some("A"), 4), (Some("B"), 3)]
        );
    }
}
