// Loading the lookup tables: either a single JSON document, or the plain-text
// word lists (fixed-width gismu list, oblique keywords, per-language
// tab-separated source word lists).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dictionary::Dictionary;
use crate::error::LoadError;
use crate::etymology;
use crate::types::*;

/// On-disk JSON form of the whole dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryDocument {
    pub roots: Vec<RootWord>,
    #[serde(default)]
    pub sourcewords: Vec<SourceRecord>,
}

/// Loaded lookup tables plus the raw source words grouped by gismu.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub dictionary: Dictionary,
    sources: BTreeMap<String, Vec<SourceWord>>,
}

impl Lexicon {
    pub fn new(roots: Vec<RootWord>, records: Vec<SourceRecord>) -> Result<Self, LoadError> {
        let dictionary = Dictionary::from_roots(roots)?;
        let mut sources: BTreeMap<String, Vec<SourceWord>> = BTreeMap::new();
        for record in records {
            if !dictionary.is_root(&record.gismu) {
                warn!(gismu = %record.gismu, "source word for unknown gismu");
            }
            sources.entry(record.gismu).or_default().push(record.word);
        }
        Ok(Self { dictionary, sources })
    }

    /// Raw (unscored) source words proposed for `gismu`.
    pub fn sources_for(&self, gismu: &str) -> &[SourceWord] {
        self.sources.get(gismu).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ranked etymology of `gismu`.
    pub fn etymology(&self, gismu: &str) -> Vec<Etymology> {
        etymology::rank_root(gismu, self.sources_for(gismu).iter().cloned())
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn load_json_str(s: &str) -> Result<Lexicon, LoadError> {
    let doc: DictionaryDocument = serde_json::from_str(s)?;
    debug!(
        roots = doc.roots.len(),
        sourcewords = doc.sourcewords.len(),
        "parsed dictionary document"
    );
    Lexicon::new(doc.roots, doc.sourcewords)
}

pub fn load_json(path: impl AsRef<Path>) -> Result<Lexicon, LoadError> {
    load_json_str(&read(path.as_ref())?)
}

// ---------------------------------------------------------------------------
// gismu.txt
// ---------------------------------------------------------------------------

// Column ranges in code points; `None` runs to end of line.
const GISMU_COL: (usize, Option<usize>) = (1, Some(7));
const RAFSI_COLS: [(usize, Option<usize>); 3] = [(7, Some(11)), (11, Some(15)), (15, Some(20))];
const KEYWORD_COL: (usize, Option<usize>) = (20, Some(41));
const DEFINITION_COL: (usize, Option<usize>) = (62, Some(159));
const COMMENT_COL: (usize, Option<usize>) = (169, None);

/// Parse the fixed-width gismu list. The first line is a header. Lines that
/// do not hold a five-letter gismu (experimental cmavo) are skipped.
pub fn parse_gismu_list(content: &str) -> Vec<RootWord> {
    let roots: Vec<RootWord> = content.lines().skip(1).filter_map(parse_gismu_line).collect();
    debug!(roots = roots.len(), "parsed gismu list");
    roots
}

/// Parse one data line of the gismu list.
pub fn parse_gismu_line(line: &str) -> Option<RootWord> {
    let chars: Vec<char> = line.chars().collect();
    let gismu = column(&chars, GISMU_COL);
    if gismu.chars().count() != 5 {
        return None;
    }

    let rafsi = RAFSI_COLS
        .iter()
        .map(|&range| column(&chars, range))
        .filter(|r| !r.is_empty())
        .collect();

    let mut keywords = BTreeMap::new();
    let keyword = column(&chars, KEYWORD_COL);
    if !keyword.is_empty() {
        keywords.insert(1, [keyword].into_iter().collect());
    }

    let (comment, xrefs) = split_notes(&column(&chars, COMMENT_COL));

    Some(RootWord {
        gismu,
        definition: column(&chars, DEFINITION_COL),
        comment,
        xrefs,
        rafsi,
        keywords,
    })
}

// Notes in gismu.txt whose brackets are misplaced, with their repaired form.
const REPAIRED_NOTES: [(&str, &str); 2] = [
    (
        "[x3 sides/surfaces should include number, size, and shape; also \
        polyhedron (= pitybli having flat/planar sides/surfaces)], regular \
        polyhedron (= kubybli, blikubli), brick (= kitybli); (cf. tapla, \
        kubli, tanbo, canlu, kojna, sefta, bolci, kurfa, tarmi)",
        "[x3 sides/surfaces should include number, size, and shape; also \
        polyhedron (= pitybli having flat/planar sides/surfaces), regular \
        polyhedron (= kubybli, blikubli), brick (= kitybli)]; (cf. tapla, \
        kubli, tanbo, canlu, kojna, sefta, bolci, kurfa, tarmi)",
    ),
    (
        "[also (adjective:) x1, x2, x4 is/are commercial (better expressed as \
        ka canja, kamcanja)]; x2/x3 may be a specific object, a commodity \
        (mass), an event (possibly service), or a property; pedantically, for \
        objects/commodities, this is sumti-raising from ownership of the \
        object/commodity (= posycanja for unambiguous semantics); (cf. dunda, \
        friti, vecnu, zarci, jdini, pleji, jdima, jerna, kargu; see note at \
        jdima on cost/price/value distinction, banxa, cirko, dunda, janta, \
        kargu, prali, sfasa, zivle)",
        "[also (adjective:) x1, x2, x4 is/are commercial (better expressed as \
        ka canja, kamcanja); x2/x3 may be a specific object, a commodity \
        (mass), an event (possibly service), or a property; pedantically, for \
        objects/commodities, this is sumti-raising from ownership of the \
        object/commodity (= posycanja for unambiguous semantics)]; (cf. dunda, \
        friti, vecnu, zarci, jdini, pleji, jdima, jerna, kargu; see note at \
        jdima on cost/price/value distinction, banxa, cirko, dunda, janta, \
        kargu, prali, sfasa, zivle)",
    ),
];

fn repair_notes(notes: &str) -> &str {
    REPAIRED_NOTES
        .iter()
        .find(|(broken, _)| *broken == notes)
        .map_or(notes, |&(_, repaired)| repaired)
}

/// Separate the notes column into free comments and "cf." cross references,
/// each group joined with "; ".
pub fn split_notes(notes: &str) -> (String, String) {
    let (xrefs, comments): (Vec<String>, Vec<String>) = split_bracketed(repair_notes(notes))
        .into_iter()
        .partition(|part| part.starts_with("cf"));
    (comments.join("; "), xrefs.join("; "))
}

/// Collect the contents of top-level (...) and [...] groups. Text outside any
/// group is dropped, except an unterminated group at the end.
fn split_bracketed(s: &str) -> Vec<String> {
    let mut parens: Vec<char> = Vec::new();
    let mut part = String::new();
    let mut parts = Vec::new();

    for c in s.chars() {
        match c {
            '(' | '[' => {
                parens.push(c);
                if parens.len() != 1 {
                    part.push(c);
                }
            }
            ')' | ']' if parens.last() == Some(&opening(c)) => {
                parens.pop();
                if !parens.is_empty() {
                    part.push(c);
                    continue;
                }
                parts.push(part.trim().to_string());
                part.clear();
            }
            _ if !parens.is_empty() => part.push(c),
            _ => {}
        }
    }

    let part = part.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
    parts
}

fn opening(close: char) -> char {
    if close == ')' {
        '('
    } else {
        '['
    }
}

/// Add oblique keywords (`<gismu><place>;kw;kw...`) to `roots`.
pub fn add_oblique_keywords(content: &str, roots: &mut [RootWord]) {
    let mut by_gismu: BTreeMap<&str, Vec<(u8, String)>> = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let Some((head, keywords)) = line.split_once(';') else {
            continue;
        };
        // Six characters: five-letter gismu and a place digit. Anything
        // else is a cmavo line.
        if head.chars().count() != 6 {
            continue;
        }
        let Some((place, gismu)) = head
            .chars()
            .last()
            .and_then(|c| Some((c.to_digit(10)? as u8, &head[..head.len() - c.len_utf8()])))
        else {
            warn!(line = idx + 1, "bad place number in oblique keywords");
            continue;
        };
        by_gismu
            .entry(gismu)
            .or_default()
            .extend(keywords.split(';').map(|k| (place, k.trim().to_string())));
    }

    for root in roots.iter_mut() {
        if let Some(entries) = by_gismu.get(root.gismu.as_str()) {
            for (place, keyword) in entries {
                root.keywords.entry(*place).or_default().insert(keyword.clone());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Source word lists
// ---------------------------------------------------------------------------

/// One column of a source word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Gismu,
    Keyword,
    Transcription,
    Sourceword,
    Alternative,
    Transliteration,
    Translation,
    Class,
    Comment,
}

/// Column layout of each language's tab-separated list.
fn columns(language: Language) -> &'static [Field] {
    use Field::*;
    match language {
        Language::Arabic | Language::Russian => &[
            Gismu, Keyword, Transcription, Sourceword, Transliteration, Translation, Comment,
        ],
        Language::Chinese => &[
            Gismu, Keyword, Transcription, Sourceword, Alternative, Transliteration, Translation,
            Comment,
        ],
        Language::English => &[Gismu, Keyword, Transcription, Sourceword, Comment],
        Language::Hindi => &[
            Gismu, Keyword, Transcription, Sourceword, Transliteration, Translation, Class, Comment,
        ],
        Language::Spanish => &[Gismu, Keyword, Transcription, Sourceword, Translation, Comment],
    }
}

/// Parse a tab-separated source word list for `language`. Blank lines and
/// lines starting with `#` are skipped; a line without a gismu is an error.
pub fn parse_source_words(
    language: Language,
    content: &str,
) -> Result<Vec<SourceRecord>, LoadError> {
    let layout = columns(language);
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let mut gismu = None;
        let mut word = SourceWord::new(language);
        for (field, value) in layout.iter().zip(line.split('\t')) {
            let value = Some(value.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            match field {
                Field::Gismu => gismu = value,
                Field::Keyword => {}
                Field::Transcription => word.transcription = value,
                Field::Sourceword => word.sourceword = value,
                Field::Alternative => word.alternative = value,
                Field::Transliteration => word.transliteration = value,
                Field::Translation => word.translation = value,
                Field::Class => word.class = value,
                Field::Comment => word.comment = value,
            }
        }
        let Some(gismu) = gismu else {
            return Err(LoadError::Malformed {
                line: idx + 1,
                message: format!("{} source word list: missing gismu", language.name()),
            });
        };
        records.push(SourceRecord { gismu, word });
    }

    debug!(language = language.code(), records = records.len(), "parsed source words");
    Ok(records)
}

/// Parse a `<code>=<path>` pair as used on the command line.
pub fn parse_source_arg(arg: &str) -> Result<(Language, &str), LoadError> {
    let (code, path) = arg
        .split_once('=')
        .ok_or_else(|| LoadError::UnknownLanguage(arg.to_string()))?;
    let language =
        Language::from_code(code).ok_or_else(|| LoadError::UnknownLanguage(code.to_string()))?;
    Ok((language, path))
}

/// Load the plain-text word lists.
pub fn load_word_lists(
    gismu_path: &Path,
    oblique_path: Option<&Path>,
    source_paths: &[(Language, &Path)],
) -> Result<Lexicon, LoadError> {
    let mut roots = parse_gismu_list(&read(gismu_path)?);
    if let Some(path) = oblique_path {
        add_oblique_keywords(&read(path)?, &mut roots);
    }
    let mut records = Vec::new();
    for &(language, path) in source_paths {
        records.extend(parse_source_words(language, &read(path)?)?);
    }
    Lexicon::new(roots, records)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

/// Trimmed text of a fixed-width column, clamped to the line length.
fn column(chars: &[char], (begin, end): (usize, Option<usize>)) -> String {
    let end = end.unwrap_or(chars.len()).min(chars.len());
    let begin = begin.min(end);
    chars[begin..end].iter().collect::<String>().trim().to_string()
}
