//! Chunk records emitted for downstream embedding or indexing.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata key holding the originating document identifier.
pub const META_SOURCE: &str = "source";
/// Metadata key holding the enclosing section title.
pub const META_SECTION: &str = "section";
/// Metadata key mirroring [`Chunk::chunk_type`].
pub const META_TYPE: &str = "type";

/// String-to-string metadata attached to every chunk.
pub type Metadata = BTreeMap<String, String>;

/// Builds the `{source}` metadata map used by whole-document strategies.
pub fn source_metadata(source: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(META_SOURCE.to_string(), source.to_string());
    metadata
}

/// Builds the `{source, section}` metadata map used for section-derived chunks.
pub fn section_metadata(source: &str, section: &str) -> Metadata {
    let mut metadata = source_metadata(source);
    metadata.insert(META_SECTION.to_string(), section.to_string());
    metadata
}

/// Strategy that produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// Question and answer pulled from a `####` heading.
    QaPair,
    /// Blank-line separated paragraph.
    Paragraph,
    /// Word window with overlap.
    FixedLength,
    /// Span between markdown headings.
    MarkdownHeader,
}

impl ChunkKind {
    /// Wire name of the kind, also stored under the `type` metadata key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QaPair => "qa_pair",
            Self::Paragraph => "paragraph",
            Self::FixedLength => "fixed_length",
            Self::MarkdownHeader => "markdown_header",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a chunk; which fields exist depends on the producing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChunkBody {
    /// Structured FAQ entry.
    QaPair {
        /// Question text with any `Q<n>:` label removed.
        question: String,
        /// Answer text.
        answer: String,
        /// Title of the enclosing `##` section.
        section: String,
    },
    /// Free text (paragraph, window or header split).
    Text {
        /// Trimmed chunk text.
        text: String,
    },
}

/// Discrete unit of text plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Text payload.
    #[serde(flatten)]
    pub body: ChunkBody,
    /// Source, section and type annotations.
    pub metadata: Metadata,
    /// Producing strategy.
    pub chunk_type: ChunkKind,
}

impl Chunk {
    /// Builds a Q&A chunk with `{source, section, type}` metadata.
    pub fn qa_pair(question: String, answer: String, section: &str, source: &str) -> Self {
        let mut metadata = section_metadata(source, section);
        metadata.insert(META_TYPE.to_string(), ChunkKind::QaPair.as_str().to_string());
        Self {
            body: ChunkBody::QaPair {
                question,
                answer,
                section: section.to_string(),
            },
            metadata,
            chunk_type: ChunkKind::QaPair,
        }
    }

    /// Builds a text chunk, tagging the caller's metadata with the chunk kind.
    pub fn text(kind: ChunkKind, text: String, mut metadata: Metadata) -> Self {
        metadata.insert(META_TYPE.to_string(), kind.as_str().to_string());
        Self {
            body: ChunkBody::Text { text },
            metadata,
            chunk_type: kind,
        }
    }

    /// Embedding-ready text: the question and answer separated by a blank line, or the raw text.
    pub fn content(&self) -> Cow<'_, str> {
        match &self.body {
            ChunkBody::Text { text } => Cow::Borrowed(text.as_str()),
            ChunkBody::QaPair {
                question, answer, ..
            } => match (question.is_empty(), answer.is_empty()) {
                (false, false) => Cow::Owned(format!("{question}\n\n{answer}")),
                (false, true) => Cow::Borrowed(question.as_str()),
                _ => Cow::Borrowed(answer.as_str()),
            },
        }
    }

    /// Question text for Q&A chunks.
    pub fn question(&self) -> Option<&str> {
        match &self.body {
            ChunkBody::QaPair { question, .. } => Some(question),
            ChunkBody::Text { .. } => None,
        }
    }

    /// Answer text for Q&A chunks.
    pub fn answer(&self) -> Option<&str> {
        match &self.body {
            ChunkBody::QaPair { answer, .. } => Some(answer),
            ChunkBody::Text { .. } => None,
        }
    }

    /// Originating document identifier.
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).map(String::as_str)
    }

    /// Enclosing section title, absent for whole-document strategies.
    pub fn section(&self) -> Option<&str> {
        self.metadata.get(META_SECTION).map(String::as_str)
    }
}
