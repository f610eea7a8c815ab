//! Chunking strategy selection and tuning knobs.

use crate::error::ChunkError;
use crate::headers::DEFAULT_HEADER_LEVELS;
use std::fmt;
use std::str::FromStr;

/// Whole-document chunking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChunkingStrategy {
    /// Sections, then Q&A headings, falling back to paragraphs per section.
    #[default]
    QaPair,
    /// Blank-line separated paragraphs over the whole document.
    Paragraph,
    /// Overlapping word windows over the whole document.
    FixedLength,
    /// Spans between headings of the configured levels.
    MarkdownHeader,
}

impl ChunkingStrategy {
    /// Every strategy, in the order accepted names are listed.
    pub const ALL: [Self; 4] = [
        Self::QaPair,
        Self::Paragraph,
        Self::FixedLength,
        Self::MarkdownHeader,
    ];

    /// Name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QaPair => "qa_pair",
            Self::Paragraph => "paragraph",
            Self::FixedLength => "fixed_length",
            Self::MarkdownHeader => "markdown_header",
        }
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkingStrategy {
    type Err = ChunkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == name)
            .ok_or_else(|| ChunkError::UnsupportedStrategy(name.to_string()))
    }
}

/// Parameters shared by the strategies that need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Window size in words for `fixed_length`.
    pub max_length: usize,
    /// Words shared by consecutive `fixed_length` windows.
    pub overlap_tokens: usize,
    /// Heading levels that start a new `markdown_header` chunk.
    pub header_levels: Vec<u8>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_length: 500,
            overlap_tokens: 50,
            header_levels: DEFAULT_HEADER_LEVELS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        for strategy in ChunkingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<ChunkingStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn unknown_name_is_unsupported() {
        let err = "semantic".parse::<ChunkingStrategy>().unwrap_err();
        assert!(matches!(err, ChunkError::UnsupportedStrategy(ref name) if name == "semantic"));
        assert_eq!(err.to_string(), "unsupported chunking strategy: semantic");
    }

    #[test]
    fn defaults_match_faq_tooling() {
        let config = ChunkingConfig::default();
        assert_eq!(config.max_length, 500);
        assert_eq!(config.overlap_tokens, 50);
        assert_eq!(config.header_levels, vec![1, 2, 3, 4]);
    }
}
