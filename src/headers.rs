//! Heading-delimited splitting for general markdown documents.

use crate::chunk::{Chunk, ChunkKind, Metadata};
use std::ops::Range;

/// Heading levels split on when the caller does not choose.
pub const DEFAULT_HEADER_LEVELS: [u8; 4] = [1, 2, 3, 4];

/// Metadata key recording the title of the enclosing heading at `level`.
pub fn header_key(level: u8) -> String {
    format!("Header {level}")
}

/// Splits `text` at headings whose level is in `levels`.
///
/// Heading lines are removed from the chunk text and recorded in metadata as
/// `Header <level>` entries for the whole enclosing path. Lines inside fenced
/// code blocks never start a split. Splits that are empty after trimming are
/// skipped.
pub fn chunk_by_headers(text: &str, levels: &[u8], metadata: &Metadata) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut path: Vec<(u8, &str)> = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    let mut fence: Option<&str> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            lines.push(line);
            continue;
        }
        if let Some(marker) = fence_marker(trimmed) {
            fence = Some(marker);
            lines.push(line);
            continue;
        }

        match parse_heading(line) {
            Some((level, title)) if levels.contains(&level) => {
                flush(&mut chunks, &lines, &path, metadata);
                lines.clear();
                while path.last().is_some_and(|(open, _)| *open >= level) {
                    path.pop();
                }
                path.push((level, title));
            }
            _ => lines.push(line),
        }
    }
    flush(&mut chunks, &lines, &path, metadata);

    chunks
}

fn flush(chunks: &mut Vec<Chunk>, lines: &[&str], path: &[(u8, &str)], base: &Metadata) {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let mut metadata = base.clone();
    for (level, title) in path {
        metadata.insert(header_key(*level), (*title).to_string());
    }
    chunks.push(Chunk::text(
        ChunkKind::MarkdownHeader,
        text.to_string(),
        metadata,
    ));
}

fn fence_marker(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Byte ranges of fenced code blocks; an unclosed fence runs to the end.
pub(crate) fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, &str)> = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        match open {
            Some((start, marker)) if trimmed.starts_with(marker) => {
                ranges.push(start..offset + line.len());
                open = None;
            }
            Some(_) => {}
            None => open = fence_marker(trimmed).map(|marker| (offset, marker)),
        }
        offset += line.len();
    }
    if let Some((start, _)) = open {
        ranges.push(start..text.len());
    }
    ranges
}

pub(crate) fn in_fence(ranges: &[Range<usize>], pos: usize) -> bool {
    ranges.iter().any(|range| range.contains(&pos))
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::source_metadata;
    use pretty_assertions::assert_eq;

    fn header(chunk: &Chunk, level: u8) -> Option<&str> {
        chunk.metadata.get(&header_key(level)).map(String::as_str)
    }

    #[test]
    fn records_heading_path() {
        let text = "# Guide\nIntro.\n## Setup\nInstall it.\n### Linux\nUse apt.\n## Usage\nRun it.";
        let chunks = chunk_by_headers(text, &DEFAULT_HEADER_LEVELS, &source_metadata("g.md"));

        let contents: Vec<String> = chunks.iter().map(|c| c.content().into_owned()).collect();
        assert_eq!(contents, vec!["Intro.", "Install it.", "Use apt.", "Run it."]);

        assert_eq!(header(&chunks[2], 1), Some("Guide"));
        assert_eq!(header(&chunks[2], 2), Some("Setup"));
        assert_eq!(header(&chunks[2], 3), Some("Linux"));

        assert_eq!(header(&chunks[3], 2), Some("Usage"));
        assert_eq!(header(&chunks[3], 3), None);
        assert_eq!(chunks[3].chunk_type, ChunkKind::MarkdownHeader);
        assert_eq!(chunks[3].source(), Some("g.md"));
    }

    #[test]
    fn fenced_code_is_not_split() {
        let text = "## Script\n```bash\n# comment, not a heading\necho hi\n```\nDone.";
        let chunks = chunk_by_headers(text, &DEFAULT_HEADER_LEVELS, &source_metadata("s.md"));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].content().contains("# comment, not a heading"));
        assert!(chunks[0].content().ends_with("Done."));
    }

    #[test]
    fn untracked_levels_stay_in_body() {
        let text = "## A\n##### Deep\ntext";
        let chunks = chunk_by_headers(text, &[2], &source_metadata("s.md"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "##### Deep\ntext");
    }

    #[test]
    fn skips_empty_splits() {
        let text = "# One\n\n# Two\nbody";
        let chunks = chunk_by_headers(text, &DEFAULT_HEADER_LEVELS, &source_metadata("s.md"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(header(&chunks[0], 1), Some("Two"));
    }

    #[test]
    fn fenced_ranges_cover_open_and_closed_blocks() {
        let text = "a\n```\nb\n```\nc\n~~~\nd";
        let ranges = fenced_ranges(text);
        assert_eq!(ranges, vec![2..12, 14..text.len()]);
        assert!(!in_fence(&ranges, 0));
        assert!(in_fence(&ranges, text.find('b').unwrap()));
        assert!(!in_fence(&ranges, text.find('c').unwrap()));
        assert!(in_fence(&ranges, text.find('d').unwrap()));
    }

    #[test]
    fn hashtag_is_not_heading() {
        assert_eq!(parse_heading("#rust is fun"), None);
        assert_eq!(parse_heading("### Title "), Some((3, "Title")));
    }
}
