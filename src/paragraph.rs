//! Blank-line paragraph chunking.

use crate::chunk::{Chunk, ChunkKind, Metadata};
use regex::Regex;
use std::sync::OnceLock;

/// Whitespace run containing at least one blank line.
pub const PARAGRAPH_BREAK_PATTERN: &str = r"\n\s*\n";

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARAGRAPH_BREAK_PATTERN).expect("paragraph break pattern"))
}

/// Splits `text` into trimmed, non-empty paragraphs.
pub fn split_paragraphs<'a>(text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    paragraph_break_re()
        .split(text)
        .map(str::trim)
        .filter(|para| !para.is_empty())
}

/// Emits one `paragraph` chunk per paragraph, each carrying a copy of `metadata`.
pub fn chunk_by_paragraph(text: &str, metadata: &Metadata) -> Vec<Chunk> {
    split_paragraphs(text)
        .map(|para| Chunk::text(ChunkKind::Paragraph, para.to_string(), metadata.clone()))
        .collect()
}
