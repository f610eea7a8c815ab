//! Top-level (`##`) section splitting.

use crate::headers::{fenced_ranges, in_fence};
use regex::Regex;
use std::sync::OnceLock;

/// A line opening with exactly two `#` markers followed by whitespace.
pub const SECTION_PATTERN: &str = r"(?m)^##[ \t]+.*$";

/// Sections whose title contains this marker are discarded.
pub const TOC_TITLE_MARKER: &str = "Table of Contents";

fn section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SECTION_PATTERN).expect("section pattern"))
}

/// Region between one `##` heading and the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Trimmed heading text.
    pub title: &'a str,
    /// Trimmed body up to the next `##` heading.
    pub content: &'a str,
}

/// Cleaned document split at its `##` headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSplit<'a> {
    /// Trimmed text before the first `##` heading; the whole text when there are none.
    pub preamble: &'a str,
    /// Sections in heading order, table of contents removed.
    pub sections: Vec<Section<'a>>,
}

/// Splits `text` into its preamble and `##` sections.
///
/// `##` lines inside fenced code blocks are body text, not headings.
pub fn split_document(text: &str) -> SectionSplit<'_> {
    let fences = fenced_ranges(text);
    let headings: Vec<_> = section_re()
        .find_iter(text)
        .filter(|heading| !in_fence(&fences, heading.start()))
        .collect();
    let preamble_end = headings.first().map_or(text.len(), |m| m.start());

    let mut sections = Vec::with_capacity(headings.len());
    for (idx, heading) in headings.iter().enumerate() {
        let end = headings
            .get(idx + 1)
            .map_or(text.len(), |next| next.start());
        let title = heading.as_str().trim_start_matches('#').trim();
        if title.contains(TOC_TITLE_MARKER) {
            continue;
        }
        sections.push(Section {
            title,
            content: text[heading.end()..end].trim(),
        });
    }

    SectionSplit {
        preamble: text[..preamble_end].trim(),
        sections,
    }
}

/// Returns the `##` sections of `text`; empty when the text has no such headings.
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    split_document(text).sections
}
