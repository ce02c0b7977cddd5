// Relevance scoring of source words against a gismu.
//
// Two heuristics, applied in order: the longest run of source-word letters
// that also appear in the gismu in the same order, then a fallback check for
// a single shared letter pair near the start of the gismu.

// A common subsequence at least this long is the score itself.
const MIN_SUBSEQUENCE: usize = 3;
// Score for a shared letter pair when no long subsequence exists.
const LETTER_PAIR_SCORE: u32 = 2;
// Words up to this length have their subsequences enumerated one by one.
// Longer words use the LCS table, which yields the same maximum.
pub const MAX_ENUMERATED_LEN: usize = 16;
// Letter pairs only count near the start of the gismu.
const ADJACENT_PAIR_MAX_INDEX: usize = 3;
const GAPPED_PAIR_MAX_INDEX: usize = 2;

/// Score `word` (a Lojban-orthography transcription) against `gismu`.
pub fn score(gismu: &str, word: &str) -> u32 {
    let matches = common_subsequences(gismu, word);
    if matches >= MIN_SUBSEQUENCE {
        return matches as u32;
    }
    if common_letter_pair(gismu, word) {
        return LETTER_PAIR_SCORE;
    }
    0
}

/// Length of the longest subsequence of `word` that is also a subsequence
/// of `gismu`.
pub fn common_subsequences(gismu: &str, word: &str) -> usize {
    let gismu: Vec<char> = gismu.chars().collect();
    let word: Vec<char> = word.chars().collect();
    if word.len() <= MAX_ENUMERATED_LEN {
        enumerate_subsequences(&gismu, &word)
    } else {
        lcs_len(&gismu, &word)
    }
}

/// True if some letter pair of `word` (adjacent, or separated by one letter)
/// also occurs near the start of `gismu`.
pub fn common_letter_pair(gismu: &str, word: &str) -> bool {
    let gismu: Vec<char> = gismu.chars().collect();
    let word: Vec<char> = word.chars().collect();

    let found = letter_pairs(&word).any(|(c, d)| {
        gismu
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g == c)
            .any(|(i, _)| {
                (i <= ADJACENT_PAIR_MAX_INDEX && gismu.get(i + 1) == Some(&d))
                    || (i <= GAPPED_PAIR_MAX_INDEX && gismu.get(i + 2) == Some(&d))
            })
    });
    found
}

/// Pairs of letters at distance one and two, interleaved by start position.
fn letter_pairs(word: &[char]) -> impl Iterator<Item = (char, char)> + '_ {
    (0..word.len()).flat_map(move |i| {
        let adjacent = word.get(i + 1).map(|&d| (word[i], d));
        let gapped = word.get(i + 2).map(|&d| (word[i], d));
        adjacent.into_iter().chain(gapped)
    })
}

/// Try every selection of letters of `word` and keep the longest that
/// embeds in `gismu`.
fn enumerate_subsequences(gismu: &[char], word: &[char]) -> usize {
    let mut best = 0;
    for mask in 0u32..(1u32 << word.len()) {
        let len = mask.count_ones() as usize;
        if len <= best {
            continue;
        }
        let selected = word
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, &c)| c);
        if is_subsequence(gismu, selected) {
            best = len;
        }
    }
    best
}

/// Greedy leftmost scan: each needle letter must occur after the previous.
fn is_subsequence(haystack: &[char], needle: impl Iterator<Item = char>) -> bool {
    let mut rest = haystack.iter();
    for c in needle {
        if !rest.any(|&h| h == c) {
            return false;
        }
    }
    true
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr_row[j + 1] = if ca == cb {
                prev_row[j] + 1
            } else {
                curr_row[j].max(prev_row[j + 1])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsequence_with_skip() {
        assert_eq!(common_subsequences("broda", "brda"), 4);
        assert_eq!(score("broda", "brda"), 4);
    }

    #[test]
    fn test_dissimilar_scores_zero() {
        assert_eq!(common_subsequences("broda", "xyz"), 0);
        assert!(!common_letter_pair("broda", "xyz"));
        assert_eq!(score("broda", "xyz"), 0);
    }

    #[test]
    fn test_self_score() {
        for gismu in ["klama", "tcana", "broda", "xrula"] {
            assert_eq!(score(gismu, gismu), 5, "{gismu}");
        }
    }

    #[test]
    fn test_order_matters() {
        // {a, m, l} all appear in {klama} but only {a, m} in that order.
        assert_eq!(common_subsequences("klama", "aml"), 2);
    }

    #[test]
    fn test_letter_pair_fallback() {
        // Only two letters in common, but {kl} is adjacent at index 0.
        assert_eq!(common_subsequences("klama", "kl"), 2);
        assert!(common_letter_pair("klama", "kl"));
        assert_eq!(score("klama", "kl"), 2);
    }

    #[test]
    fn test_gapped_pair() {
        // {k_a}: k at 0, a at 2 in {klama}.
        assert!(common_letter_pair("klama", "kxa"));
        assert_eq!(score("klama", "kxa"), 2);
    }

    #[test]
    fn test_pair_position_limits() {
        // {ma} sits at index 3..4: adjacent pairs are allowed up to index 3.
        assert!(common_letter_pair("klama", "ma"));
        // {a_a}: a at 2 and 4; a gap pair must start at index 2 or earlier.
        assert!(common_letter_pair("klama", "axa"));
        // {m_x}: nothing matches.
        assert!(!common_letter_pair("klama", "mx"));
    }

    #[test]
    fn test_pair_past_end_of_short_gismu() {
        assert!(!common_letter_pair("ab", "bz"));
        assert_eq!(score("", "abc"), 0);
        assert_eq!(score("abc", ""), 0);
    }

    #[test]
    fn test_single_common_letter_scores_zero() {
        assert_eq!(common_subsequences("klama", "xkx"), 1);
        assert_eq!(score("klama", "xkx"), 0);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(common_subsequences("klama", "KLAMA"), 0);
    }

    #[test]
    fn test_code_points() {
        assert_eq!(common_subsequences("ĉaŭno", "ĉŭo"), 3);
    }

    #[test]
    fn test_long_words_match_enumeration() {
        let gismu = "tcanaklamabroda";
        let short = "tcxnaklxmabr";
        let long = "tcxnaklxmabrodaqqqq";
        let s: Vec<char> = short.chars().collect();
        let g: Vec<char> = gismu.chars().collect();
        assert_eq!(enumerate_subsequences(&g, &s), lcs_len(&g, &s));
        assert!(long.chars().count() > MAX_ENUMERATED_LEN);
        assert_eq!(common_subsequences(gismu, long), 13);
    }

    #[test]
    fn test_letter_pairs_order() {
        let word: Vec<char> = "abcd".chars().collect();
        let pairs: Vec<_> = letter_pairs(&word).collect();
        assert_eq!(
            pairs,
            [('a', 'b'), ('a', 'c'), ('b', 'c'), ('b', 'd'), ('c', 'd')]
        );
    }
}
