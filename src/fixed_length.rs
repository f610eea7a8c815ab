//! Word windows with overlap for documents without usable structure.

use crate::chunk::{Chunk, ChunkKind, Metadata};
use crate::error::ChunkError;

/// Checks that a window walk with these parameters advances.
pub fn validate_window(max_length: usize, overlap_tokens: usize) -> Result<(), ChunkError> {
    if max_length == 0 {
        return Err(ChunkError::InvalidConfig(
            "max_length must be at least one word".to_string(),
        ));
    }
    if overlap_tokens >= max_length {
        return Err(ChunkError::InvalidConfig(format!(
            "overlap_tokens ({overlap_tokens}) must be smaller than max_length ({max_length})"
        )));
    }
    Ok(())
}

/// Splits `text` into windows of up to `max_length` words.
///
/// Consecutive windows share `overlap_tokens` words; the last window may be
/// shorter. Words are re-joined with single spaces.
pub fn chunk_by_fixed_length(
    text: &str,
    max_length: usize,
    overlap_tokens: usize,
    metadata: &Metadata,
) -> Result<Vec<Chunk>, ChunkError> {
    validate_window(max_length, overlap_tokens)?;

    let words: Vec<&str> = text.split_whitespace().collect();
    let step = max_length - overlap_tokens;
    let mut chunks = Vec::with_capacity(words.len().div_ceil(step));
    let mut start = 0usize;
    while start < words.len() {
        let end = (start + max_length).min(words.len());
        chunks.push(Chunk::text(
            ChunkKind::FixedLength,
            words[start..end].join(" "),
            metadata.clone(),
        ));
        start += step;
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::source_metadata;
    use pretty_assertions::assert_eq;

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn windows_advance_by_step() {
        let text = numbered_words(25);
        let chunks = chunk_by_fixed_length(&text, 10, 3, &source_metadata("doc.md")).unwrap();

        let firsts: Vec<String> = chunks
            .iter()
            .map(|c| c.content().split(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(firsts, vec!["w0", "w7", "w14", "w21"]);
        assert!(chunks
            .iter()
            .all(|c| c.content().split(' ').count() <= 10));
        assert_eq!(chunks[3].content(), "w21 w22 w23 w24");
    }

    #[test]
    fn consecutive_windows_share_overlap() {
        let text = numbered_words(25);
        let chunks = chunk_by_fixed_length(&text, 10, 3, &source_metadata("doc.md")).unwrap();
        let first: Vec<String> = chunks[0].content().split(' ').map(String::from).collect();
        let second: Vec<String> = chunks[1].content().split(' ').map(String::from).collect();
        assert_eq!(&first[7..], &second[..3]);
        assert_eq!(&second[..3], &["w7", "w8", "w9"]);
    }

    #[test]
    fn collapses_whitespace_between_words() {
        let chunks =
            chunk_by_fixed_length("a\n\nb\t c", 500, 50, &source_metadata("doc.md")).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "a b c");
        assert_eq!(chunks[0].chunk_type, ChunkKind::FixedLength);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let chunks = chunk_by_fixed_length("  \n ", 10, 3, &source_metadata("doc.md")).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_window() {
        let meta = source_metadata("doc.md");
        assert!(matches!(
            chunk_by_fixed_length("a b c", 10, 10, &meta),
            Err(ChunkError::InvalidConfig(_))
        ));
        assert!(matches!(
            chunk_by_fixed_length("a b c", 10, 50, &meta),
            Err(ChunkError::InvalidConfig(_))
        ));
        assert!(matches!(
            chunk_by_fixed_length("a b c", 0, 0, &meta),
            Err(ChunkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_overlap_partitions_words() {
        let text = numbered_words(6);
        let chunks = chunk_by_fixed_length(&text, 3, 0, &source_metadata("doc.md")).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].content(), "w3 w4 w5");
    }
}
