use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A root word (gismu) with its dictionary metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootWord {
    /// The canonical five-letter form (e.g., {klama}).
    pub gismu: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Cross references, e.g. "cf. cliva, litru".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub xrefs: String,
    /// Affix forms (rafsi) in CVC, CCV, CVV order.
    #[serde(default)]
    pub rafsi: Vec<String>,
    /// Argument place (1-based) to its keywords.
    #[serde(default)]
    pub keywords: BTreeMap<u8, BTreeSet<String>>,
}

impl RootWord {
    /// The keyword used as the tooltip label for references to this root:
    /// the first keyword of place 1.
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords
            .get(&1)
            .and_then(|kws| kws.iter().next())
            .map(String::as_str)
    }
}

/// How a span of a token was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A full gismu, or the four-letter long form of one glued with {y}.
    Root,
    /// A rafsi from the affix table.
    Affix,
}

/// One recognised piece of a decomposed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The surface text matched (e.g., {klam}, {tca}, {tcana}).
    pub text: String,
    /// The gismu the text resolves to.
    pub gismu: String,
    pub kind: MatchKind,
    /// True if a glue {y} follows this span in the token.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub glue: bool,
}

/// Source languages of the etymology lists, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Arabic,
        Language::Chinese,
        Language::English,
        Language::Hindi,
        Language::Russian,
        Language::Spanish,
    ];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Russian => "ru",
            Language::Spanish => "es",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Arabic => "Arabic",
            Language::Chinese => "Chinese",
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Russian => "Russian",
            Language::Spanish => "Spanish",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Text direction of the native script.
    pub fn is_rtl(self) -> bool {
        self == Language::Arabic
    }
}

/// A candidate source word for one gismu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWord {
    pub language: Language,
    /// Native-script form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourceword: Option<String>,
    /// Simplified native form (Chinese only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    /// Latin transcription in Lojban orthography; this is what gets scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Phonological class of the transliteration (Hindi only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Relevance score against the owning gismu. Zero until scored.
    #[serde(default)]
    pub score: u32,
    /// Set during ranking when the comment marks the etymology as doubtful.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dubious: bool,
}

impl SourceWord {
    /// An empty record for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            sourceword: None,
            alternative: None,
            transcription: None,
            transliteration: None,
            translation: None,
            comment: None,
            class: None,
            score: 0,
            dubious: false,
        }
    }

    /// The native form, if present and non-empty.
    pub fn native(&self) -> Option<&str> {
        self.sourceword.as_deref().filter(|s| !s.is_empty())
    }

    /// True if the comment flags this etymology as questionable.
    pub fn is_dubious(&self) -> bool {
        self.comment
            .as_deref()
            .map_or(false, |c| c.contains("dubious") || c.contains("FIXIT"))
    }
}

/// A raw source word record tied to the gismu it was proposed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub gismu: String,
    #[serde(flatten)]
    pub word: SourceWord,
}

/// Ranked source words for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etymology {
    pub language: Language,
    /// True if the native forms are written right to left.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rtl: bool,
    pub sourcewords: Vec<SourceWord>,
}
