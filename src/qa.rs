//! Question/answer extraction from `####` headings inside a section.

use crate::chunk::Chunk;
use crate::headers::{fenced_ranges, in_fence};
use crate::sections::Section;
use regex::Regex;
use std::sync::OnceLock;

/// Numbered FAQ heading: `#### Q<digits>: question`. Captures the question without its label.
pub const QA_PRIMARY_PATTERN: &str = r"(?m)^####[ \t]+Q\d+:[ \t]*(.*)$";
/// Any fourth-level heading. Captures the heading text verbatim.
pub const QA_FALLBACK_PATTERN: &str = r"(?m)^####[ \t]+(\S.*)$";

fn primary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(QA_PRIMARY_PATTERN).expect("primary qa pattern"))
}

fn fallback_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(QA_FALLBACK_PATTERN).expect("fallback qa pattern"))
}

/// Outcome of running the extractor over one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaExtraction {
    /// One chunk per matched heading, in appearance order.
    Extracted(Vec<Chunk>),
    /// No heading matched; the caller picks another strategy.
    Empty,
}

impl QaExtraction {
    /// Returns the extracted chunks, or an empty vector for [`QaExtraction::Empty`].
    pub fn into_chunks(self) -> Vec<Chunk> {
        match self {
            Self::Extracted(chunks) => chunks,
            Self::Empty => Vec::new(),
        }
    }
}

struct Heading<'a> {
    start: usize,
    end: usize,
    line: &'a str,
    text: &'a str,
}

fn question_headings(content: &str) -> Vec<Heading<'_>> {
    let fences = fenced_ranges(content);
    fallback_re()
        .captures_iter(content)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            let text = caps.get(1)?;
            if in_fence(&fences, line.start()) {
                return None;
            }
            Some(Heading {
                start: line.start(),
                end: line.end(),
                line: line.as_str(),
                text: text.as_str(),
            })
        })
        .collect()
}

/// Trimmed section text ahead of the first `####` heading.
///
/// This is the whole content when the section has no such heading.
pub fn section_intro<'a>(section: &Section<'a>) -> &'a str {
    let content = section.content;
    let end = question_headings(content)
        .first()
        .map_or(content.len(), |heading| heading.start);
    content[..end].trim()
}

/// Extracts Q&A chunks from a section.
///
/// Numbered `#### Q<n>:` headings are preferred. Only when none exist is every
/// `####` heading treated as a question. Each answer runs to the next `####`
/// heading or the end of the section. A bare `####` line with no text is not a
/// heading and stays inside the surrounding answer. Text before the first
/// heading is left to [`section_intro`].
pub fn extract_qa_pairs(section: &Section<'_>, source: &str) -> QaExtraction {
    let content = section.content;
    let headings = question_headings(content);
    if headings.is_empty() {
        return QaExtraction::Empty;
    }

    let numbered: Vec<(usize, &str)> = headings
        .iter()
        .enumerate()
        .filter_map(|(idx, heading)| {
            primary_re()
                .captures(heading.line)
                .and_then(|caps| caps.get(1))
                .map(|question| (idx, question.as_str()))
        })
        .collect();
    let questions = if numbered.is_empty() {
        headings
            .iter()
            .enumerate()
            .map(|(idx, heading)| (idx, heading.text))
            .collect()
    } else {
        numbered
    };

    let chunks: Vec<Chunk> = questions
        .into_iter()
        .map(|(idx, question)| {
            let answer_end = headings
                .get(idx + 1)
                .map_or(content.len(), |next| next.start);
            let answer = content[headings[idx].end..answer_end].trim();
            Chunk::qa_pair(
                question.trim().to_string(),
                answer.to_string(),
                section.title,
                source,
            )
        })
        .filter(|chunk| !chunk.content().trim().is_empty())
        .collect();

    if chunks.is_empty() {
        QaExtraction::Empty
    } else {
        QaExtraction::Extracted(chunks)
    }
}
