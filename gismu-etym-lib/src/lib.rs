pub mod types;
pub mod error;
pub mod config;
pub mod dictionary;
pub mod morphology;
pub mod relevance;
pub mod etymology;
pub mod annotate;
pub mod loader;
pub mod output;

pub use annotate::{annotate, AnnotatedText, AnnotatedToken};
pub use config::AnnotatorConfig;
pub use dictionary::{AffixIndex, Dictionary, RootIndex};
pub use error::{LoadError, MatchFailure};
pub use etymology::{rank, rank_root};
pub use loader::Lexicon;
pub use morphology::decompose;
pub use relevance::score;
pub use types::{Etymology, Language, MatchKind, RootWord, SourceWord, Span};
