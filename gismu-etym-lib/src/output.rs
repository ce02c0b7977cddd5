// Output formatting for annotated text and decompositions.

use serde::Serialize;

use crate::annotate::{AnnotatedText, AnnotatedToken};
use crate::config::AnnotatorConfig;
use crate::dictionary::Dictionary;
use crate::morphology::GLUE;
use crate::types::*;

/// Where a recognised span points: the entry of its gismu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub document: String,
    pub anchor: String,
    /// Tooltip label: the gismu's primary keyword.
    pub title: String,
}

/// Resolve a span to the dictionary entry it refers to.
pub fn reference(span: &Span, dict: &Dictionary, config: &AnnotatorConfig) -> Reference {
    let title = dict
        .lookup(&span.gismu)
        .and_then(RootWord::primary_keyword)
        .unwrap_or_default();
    Reference {
        document: config.document_for(&span.gismu),
        anchor: span.gismu.clone(),
        title: title.to_string(),
    }
}

/// Rebuild the surface word from its spans, glue letters included.
pub fn reconstruct(spans: &[Span]) -> String {
    let mut word = String::new();
    for span in spans {
        word.push_str(&span.text);
        if span.glue {
            word.push(GLUE);
        }
    }
    word
}

/// Convert spans to bracketed {text:gismu} format.
///
/// Format:
///   Rafsi:     `{kla:klama}`
///   Long form: `{klam:klama}y` (glue letter outside the braces)
///   Gismu:     `{tcana:tcana}`
pub fn spans_to_bracketed(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        let Span { text, gismu, .. } = span;
        out.push_str(&format!("{{{text}:{gismu}}}"));
        if span.glue {
            out.push(GLUE);
        }
    }
    out
}

/// A token in bracketed format, or unchanged if unmarked.
pub fn to_bracketed(token: &AnnotatedToken) -> String {
    if !token.is_marked() {
        return token.raw();
    }
    format!(
        "{}{}{}",
        token.before,
        spans_to_bracketed(&token.spans),
        token.after
    )
}

/// Format annotated text in bracketed format, tokens joined by single spaces.
pub fn text_to_bracketed(text: &AnnotatedText) -> String {
    text.tokens
        .iter()
        .map(to_bracketed)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A token as HTML: one anchor per span, everything else escaped.
pub fn to_html(token: &AnnotatedToken, dict: &Dictionary, config: &AnnotatorConfig) -> String {
    if !token.is_marked() {
        return html_escape(&token.raw());
    }
    let mut out = html_escape(&token.before);
    for span in &token.spans {
        let r = reference(span, dict, config);
        out.push_str(&format!(
            r#"<a class="gismuref" href="{}#{}" title="{}">{}</a>"#,
            html_escape(&r.document),
            html_escape(&r.anchor),
            html_escape(&r.title),
            html_escape(&span.text),
        ));
        if span.glue {
            out.push(GLUE);
        }
    }
    out.push_str(&html_escape(&token.after));
    out
}

/// Format annotated text as HTML, tokens joined by single spaces.
pub fn text_to_html(text: &AnnotatedText, dict: &Dictionary, config: &AnnotatorConfig) -> String {
    text.tokens
        .iter()
        .map(|t| to_html(t, dict, config))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote ampersands and angle brackets, plus double quotes for attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
